mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::{assert_failed, TestApp};

#[tokio::test]
async fn second_page_of_twenty_five_products() -> Result<()> {
    let app = TestApp::new();
    let (token, _, outlet_id) = app.owner_with_outlet("owner@example.com").await?;
    for stock in 1..=25 {
        app.create_product(&token, outlet_id, &format!("Beans #{}", stock), stock).await?;
    }

    let (status, body) = app
        .get(
            &format!("/api/products?outlet_id={}&page=2&limit=10&sort=stock+asc", outlet_id),
            &token,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success get data");

    let stocks: Vec<i64> = body["data"]["data"]
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|p| p["stock"].as_i64())
        .collect();
    assert_eq!(stocks, (11..=20).collect::<Vec<_>>());

    let paging = &body["data"]["paging"];
    assert_eq!(paging["total_record"], 25);
    assert_eq!(paging["total_page"], 3);
    assert_eq!(paging["page"], 2);
    assert_eq!(paging["size"], 10);
    assert_eq!(paging["order_by"], "stock");
    assert_eq!(paging["sort_by"], "asc");
    Ok(())
}

#[tokio::test]
async fn descending_sort_and_last_partial_page() -> Result<()> {
    let app = TestApp::new();
    let (token, _, outlet_id) = app.owner_with_outlet("owner@example.com").await?;
    for stock in 1..=7 {
        app.create_product(&token, outlet_id, "Beans", stock).await?;
    }

    let (status, body) = app
        .get("/api/products?page=2&limit=5&sort=stock+desc", &token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let stocks: Vec<i64> = body["data"]["data"]
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|p| p["stock"].as_i64())
        .collect();
    assert_eq!(stocks, vec![2, 1]);
    assert_eq!(body["data"]["paging"]["total_page"], 2);
    Ok(())
}

#[tokio::test]
async fn malformed_sort_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let (token, _, _) = app.owner_with_outlet("owner@example.com").await?;

    for sort in ["stock", "stock+sideways", "password+asc", "stock+asc+name"] {
        let (status, body) = app.get(&format!("/api/products?sort={}", sort), &token).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "sort={}", sort);
        assert_failed(&body, "StatusBadRequest");
    }
    Ok(())
}

#[tokio::test]
async fn invalid_page_or_limit_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let (token, _, _) = app.owner_with_outlet("owner@example.com").await?;

    for query in ["page=0", "limit=0", "page=abc"] {
        let (status, _) = app.get(&format!("/api/products?{}", query), &token).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
    }
    Ok(())
}

#[tokio::test]
async fn page_beyond_addressable_rows_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let (token, _, outlet_id) = app.owner_with_outlet("owner@example.com").await?;
    app.create_product(&token, outlet_id, "Espresso", 3).await?;

    let (status, body) = app
        .get(&format!("/api/products?page={}&limit=10", i64::MAX), &token)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failed(&body, "StatusBadRequest");

    // a far but representable page is just empty
    let (status, body) = app.get("/api/products?page=1000000&limit=10", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["data"]["paging"]["total_record"], 1);
    assert_eq!(body["data"]["paging"]["page"], 1000000);
    Ok(())
}

#[tokio::test]
async fn single_record_is_one_page_and_empty_is_zero() -> Result<()> {
    let app = TestApp::new();
    let (token, _, outlet_id) = app.owner_with_outlet("owner@example.com").await?;

    let (status, body) = app.get("/api/products", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["data"]["paging"]["total_record"], 0);
    assert_eq!(body["data"]["paging"]["total_page"], 0);
    assert_eq!(body["data"]["paging"]["size"], 10);
    assert_eq!(body["data"]["paging"]["order_by"], "created_at");

    app.create_product(&token, outlet_id, "Espresso", 3).await?;
    let (_, body) = app.get("/api/products", &token).await?;
    assert_eq!(body["data"]["paging"]["total_record"], 1);
    assert_eq!(body["data"]["paging"]["total_page"], 1);
    Ok(())
}

#[tokio::test]
async fn name_filter_treats_wildcards_literally() -> Result<()> {
    let app = TestApp::new();
    let (token, _, outlet_id) = app.owner_with_outlet("owner@example.com").await?;
    app.create_product(&token, outlet_id, "50% off blend", 1).await?;
    app.create_product(&token, outlet_id, "500 grams", 1).await?;
    app.create_product(&token, outlet_id, "House", 1).await?;

    let (status, body) = app.get("/api/products?name=50%25", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paging"]["total_record"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "50% off blend");

    let (_, body) = app.get("/api/products?name=HOUSE", &token).await?;
    assert_eq!(body["data"]["paging"]["total_record"], 1);
    Ok(())
}

#[tokio::test]
async fn merchant_name_filter_combines_with_owner_scope() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.signup("owner@example.com").await?;
    app.create_merchant(&token, "Kopi Nusantara").await?;
    app.create_merchant(&token, "Teh Manis").await?;

    let (status, body) = app.get("/api/merchants?name=kopi", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paging"]["total_record"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "Kopi Nusantara");
    Ok(())
}
