//! AWS Lambda handler for three-scenario comparisons
//!
//! Accepts `{ "calculator": "flip" | "multi", "scenario1": .., "scenario2": .., "scenario3": .. }`
//! and returns the comparison plus every per-scenario analysis.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use chrono::{DateTime, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use realty_calc::flip::{FlipAnalysis, FlipComparison, FlipScenario};
use realty_calc::multi::{MultiComparison, MultiScenario, RentalAnalysis};
use realty_calc::{CalcError, ScenarioStore, Triple};

#[derive(Debug, Deserialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
enum CompareRequest {
    Flip(Triple<FlipScenario>),
    Multi(Triple<MultiScenario>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "calculator", rename_all = "lowercase")]
enum CompareResult {
    Flip {
        comparison: FlipComparison,
        analyses: Triple<FlipAnalysis>,
    },
    Multi {
        comparison: MultiComparison,
        analyses: Triple<RentalAnalysis>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    generated_at: DateTime<Utc>,
    execution_time_ms: u64,
    #[serde(flatten)]
    result: CompareResult,
}

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

fn http_response(status: u16, body: Option<String>) -> Value {
    let mut headers = serde_json::Map::new();
    headers.insert("Content-Type".into(), json!("application/json"));
    for (name, value) in CORS_HEADERS {
        headers.insert(name.into(), json!(value));
    }
    json!({
        "statusCode": status,
        "headers": headers,
        "body": body.unwrap_or_default(),
        "isBase64Encoded": false,
    })
}

fn error_response(status: u16, message: &str) -> Value {
    http_response(status, Some(json!({ "error": message }).to_string()))
}

fn run_comparison(request: CompareRequest) -> Result<CompareResult, CalcError> {
    match request {
        CompareRequest::Flip(set) => {
            let mut store =
                ScenarioStore::from_scenarios(set.scenario1, set.scenario2, set.scenario3);
            let analyses = store.calculate_each()?;
            let comparison = FlipComparison::from_analyses(&analyses);
            Ok(CompareResult::Flip { comparison, analyses })
        }
        CompareRequest::Multi(set) => {
            let mut store =
                ScenarioStore::from_scenarios(set.scenario1, set.scenario2, set.scenario3);
            let analyses = store.calculate_each()?;
            let comparison = MultiComparison::from_analyses(&analyses);
            Ok(CompareResult::Multi { comparison, analyses })
        }
    }
}

/// Turn a request body into the HTTP response payload
fn handle_body(body: &str) -> Value {
    let start = std::time::Instant::now();

    let request: CompareRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request body: {e}");
            return error_response(400, &format!("Invalid JSON: {e}"));
        }
    };

    let result = match run_comparison(request) {
        Ok(r) => r,
        Err(e) if e.is_client_error() => {
            warn!("Rejected scenario input: {e}");
            return error_response(400, &e.to_string());
        }
        Err(e) => return error_response(500, &e.to_string()),
    };

    let response = CompareResponse {
        generated_at: Utc::now(),
        execution_time_ms: start.elapsed().as_millis() as u64,
        result,
    };

    match serde_json::to_string(&response) {
        Ok(body) => http_response(200, Some(body)),
        Err(e) => error_response(500, &format!("Unable to encode response: {e}")),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(http_response(200, None));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let response = handle_body(&body);
    info!("Responded with status {}", response["statusCode"]);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_body(sale_prices: [f64; 3]) -> String {
        let scenario = |sale: f64| {
            json!({
                "acquisition": { "purchasePrice": 100000 },
                "revenues": { "expectedSalePrice": sale },
                "propertyFinancing": { "downPayment": 100000 }
            })
        };
        json!({
            "calculator": "flip",
            "scenario1": scenario(sale_prices[0]),
            "scenario2": scenario(sale_prices[1]),
            "scenario3": scenario(sale_prices[2]),
        })
        .to_string()
    }

    fn body_of(response: &Value) -> Value {
        serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_flip_comparison_ok() {
        let response = handle_body(&flip_body([110_000.0, 130_000.0, 120_000.0]));
        assert_eq!(response["statusCode"], 200);
        let body = body_of(&response);
        assert_eq!(body["calculator"], "flip");
        assert_eq!(body["comparison"]["bestScenario"], 2);
        assert_eq!(body["analyses"]["scenario1"]["profitability"]["netProfit"], 10_000.0);
    }

    #[test]
    fn test_multi_comparison_ok() {
        let scenario = json!({
            "property": { "numberOfUnits": 2, "purchasePrice": 300000 },
            "revenues": { "residentialRent": 2500 },
            "financing": { "downPayment": 300000 }
        });
        let body = json!({
            "calculator": "multi",
            "scenario1": scenario,
            "scenario2": scenario,
            "scenario3": scenario,
        })
        .to_string();
        let response = handle_body(&body);
        assert_eq!(response["statusCode"], 200);
        assert_eq!(body_of(&response)["comparison"]["bestScenario"], 1);
    }

    #[test]
    fn test_negative_input_is_bad_request() {
        let response = handle_body(&flip_body([-1.0, 100_000.0, 100_000.0]));
        assert_eq!(response["statusCode"], 400);
        assert!(body_of(&response)["error"].as_str().unwrap().contains("expectedSalePrice"));
    }

    #[test]
    fn test_unknown_calculator_is_bad_request() {
        let response = handle_body(r#"{"calculator":"condo"}"#);
        assert_eq!(response["statusCode"], 400);
    }
}
