use shopscrape_core::{ReviewEntry, SizeCell, SizeVariant};

use super::*;

const HOST: &str = "https://shop.example.com";

const PRODUCT_PAGE: &str = r#"<html><head>
<style>.bar .marker.mod-marker_3{left:50%;}</style>
<script id="__NEXT_DATA__" type="application/json">
{"props":{"pageProps":{"apis":{"pdpInitialProps":{"detailApi":{"product":{"article":{"image":{"details":[
  {"imageUrl":{"large":"/img/AB1234_01.jpg"}},
  {"imageUrl":{"large":"/img/AB1234_02.jpg"}}
]}}}}}}}}}
</script>
</head><body>
<ul>
  <li class="breadcrumbListItem"><a href="/">Home</a></li>
  <li class="breadcrumbListItem"><a href="/category/shoes/">Shoes</a></li>
  <li class="breadcrumbListItem"><a href="/model/AB1234/">Running</a></li>
</ul>
<span class="groupName">Running</span>
<h1 class="itemTitle">Adizero Boston</h1>
<span class="price-value">12,800</span>
<ul>
  <li class="sizeSelectorListItem"><button>26.0cm</button></li>
  <li class="sizeSelectorListItem"><button>27.0cm</button></li>
</ul>
<div class="bar"><span class="marker mod-marker_3"></span></div>
<h2 class="itemFeature">Built to go long</h2>
<div class="description_part details">A daily trainer.</div>
<li class="articleFeaturesItem">Regular fit</li>
<div class="item_part details"><a href="/tech/boost">BOOST</a> returns energy</div>
<div class="itemTagsPosition"><div class="inner"><a href="/t/run">running</a></div></div>
</body></html>"#;

#[test]
fn extract_page_reads_every_field() {
    let page = extract_page(PRODUCT_PAGE, HOST);
    assert_eq!(page.breadcrumb.path, "Shoes / Running");
    assert_eq!(page.breadcrumb.model, "AB1234");
    assert_eq!(
        page.image_urls,
        vec![
            "https://shop.example.com/img/AB1234_01.jpg",
            "https://shop.example.com/img/AB1234_02.jpg"
        ]
    );
    assert_eq!(page.category, "Running");
    assert_eq!(page.name, "Adizero Boston");
    assert_eq!(page.price, "12800");
    assert_eq!(page.available_sizes, vec!["26.0cm", "27.0cm"]);
    assert_eq!(page.sense_of_size, "Appropriate: 50%");
    assert_eq!(page.description.title, "Built to go long");
    assert_eq!(page.description.general, "A daily trainer.");
    assert_eq!(page.description.itemization, "• Regular fit");
    assert_eq!(page.special_function, "[ BOOST ] returns energy");
    assert_eq!(page.keywords, vec!["running"]);
}

#[test]
fn extract_page_without_embedded_data_has_no_images() {
    let body = r#"<ul>
        <li class="breadcrumbListItem"><a href="/">Home</a></li>
        <li class="breadcrumbListItem"><a href="/c/shoes/">Shoes</a></li>
        <li class="breadcrumbListItem"><a href="/model/AB1234/">Running</a></li>
      </ul><span class="price-value">12,800</span>"#;
    let record = extract_page(body, HOST).into_record(
        "AB1234",
        "https://shop.example.com/products/AB1234/",
        SizeChart::default(),
        ReviewSummary::default(),
    );

    assert_eq!(record.breadcrumb, "Shoes / Running");
    assert_eq!(record.model, "AB1234");
    assert_eq!(record.price, "12800");
    assert_eq!(record.currency, "¥");
    assert!(record.image_urls.is_empty());
}

#[test]
fn extract_page_empty_body_is_default() {
    assert_eq!(extract_page("", HOST), PageFields::default());
}

#[test]
fn into_record_carries_identity_and_secondary_sources() {
    let mut chart = SizeChart::default();
    chart.size_chart.insert(
        "0".to_owned(),
        SizeVariant {
            header: [(
                "0".to_owned(),
                [("0".to_owned(), SizeCell { value: "cm".to_owned() })].into(),
            )]
            .into(),
            ..SizeVariant::default()
        },
    );
    let review = ReviewSummary {
        rating: "4.0".to_owned(),
        details: vec![ReviewEntry {
            title: "Nice".to_owned(),
            ..ReviewEntry::default()
        }],
        ..ReviewSummary::default()
    };

    let record = PageFields::default().into_record(
        "XY0001",
        "https://shop.example.com/products/XY0001/",
        chart.clone(),
        review.clone(),
    );

    assert_eq!(record.id, "XY0001");
    assert_eq!(record.url, "https://shop.example.com/products/XY0001/");
    assert_eq!(record.currency, "¥");
    assert_eq!(record.tale_of_size, chart);
    assert_eq!(record.review, review);
    assert_eq!(record.model, "");
}
