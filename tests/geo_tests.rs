use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use pujaportal::geo::{Geocoder, NominatimClient, PincodeLookup, PostalPincodeClient};

async fn pincode_handler(Path(code): Path<String>) -> Json<Value> {
    if code == "221001" {
        Json(json!([{
            "Status": "Success",
            "PostOffice": [{
                "Name": "Varanasi City",
                "District": "Varanasi",
                "State": "Uttar Pradesh",
                "Country": "India"
            }]
        }]))
    } else {
        Json(json!([{ "Status": "Error", "PostOffice": null }]))
    }
}

async fn reverse_handler() -> Json<Value> {
    Json(json!({
        "display_name": "Dashashwamedh Ghat, Varanasi, Uttar Pradesh, India",
        "address": {
            "city": "Varanasi",
            "state": "Uttar Pradesh",
            "postcode": "221001",
            "country": "India"
        }
    }))
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_pincode_lookup_success() {
    let base = spawn(Router::new().route("/pincode/:code", get(pincode_handler))).await;
    let client = PostalPincodeClient::with_base_url(base);

    let area = client.lookup("221001").await.unwrap().unwrap();
    assert_eq!(area.locality, "Varanasi City");
    assert_eq!(area.district, "Varanasi");
    assert_eq!(area.state, "Uttar Pradesh");
    assert_eq!(area.country, "India");
}

#[tokio::test]
async fn test_pincode_lookup_unknown_is_none() {
    let base = spawn(Router::new().route("/pincode/:code", get(pincode_handler))).await;
    let client = PostalPincodeClient::with_base_url(base);

    assert!(client.lookup("000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reverse_geocode() {
    let base = spawn(Router::new().route("/reverse", get(reverse_handler))).await;
    let client = NominatimClient::with_base_url(base);

    let address = client.reverse(25.3109, 83.0107).await.unwrap().unwrap();
    assert_eq!(address.city.as_deref(), Some("Varanasi"));
    assert_eq!(address.pincode.as_deref(), Some("221001"));
    assert!(address.display_name.contains("Varanasi"));
}
