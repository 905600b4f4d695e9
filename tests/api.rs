#[macro_use]
mod common;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header::ContentType};
use actix_web::test;
use serde_json::{Value, json};

async fn body_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("json body")
}

fn num(v: &Value) -> f64 {
    v.as_f64().expect("number")
}

#[actix_web::test]
async fn created_employee_reads_back_by_business_key() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({
            "employeeId": "EMP-001",
            "name": "Asha Patil",
            "email": "asha.patil@clinic.in",
            "department": "Nursing",
            "position": "Head Nurse",
            "hireDate": "2024-01-15"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["success"], true);

    let req = test::TestRequest::get().uri("/api/employees/EMP-001").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;

    let data = &fetched["data"];
    assert_eq!(data, &created["data"]);
    assert_eq!(data["employeeId"], "EMP-001");
    assert_eq!(data["name"], "Asha Patil");
    assert_eq!(data["email"], "asha.patil@clinic.in");
    assert_eq!(data["department"], "Nursing");
    assert_eq!(data["status"], "active");
    assert_eq!(data["hireDate"], "2024-01-15");

    let req = test::TestRequest::get().uri("/api/employees/").to_request();
    let list = body_json(test::call_service(&app, req).await).await;
    assert_eq!(list["count"], 1);
}

#[actix_web::test]
async fn missing_required_field_is_rejected() {
    let app = test_app!(common::memory_stores());

    let cases = [
        (
            "/api/employees",
            json!({"employeeId": "EMP-1", "name": "No Email"}),
            "Missing required fields: employeeId, name, and email are required",
        ),
        (
            "/api/payroll",
            json!({"employeeId": "EMP-1", "employeeName": "A", "monthlySalary": 100}),
            "Missing required fields: employeeId, employeeName, monthlySalary, and annualPackage are required",
        ),
        (
            "/api/expenses",
            json!({"month": "January", "year": 2024, "officeRent": 100}),
            "Missing required fields: month, year, officeRent, and utilities are required",
        ),
        (
            "/api/financial",
            json!({"month": "January", "income": 1, "expense": 1}),
            "Missing required fields: month, year, income, and expense are required",
        ),
    ];

    for (uri, body, message) in cases {
        let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }
}

#[actix_web::test]
async fn invalid_email_and_duplicate_key_are_client_errors() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({"employeeId": "EMP-1", "name": "A", "email": "not-an-email"}))
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["error"], "Invalid email format");

    let employee = json!({"employeeId": "EMP-1", "name": "A", "email": "a@b.co"});
    let req = test::TestRequest::post().uri("/api/employees").set_json(&employee).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/employees").set_json(&employee).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["success"], false);
}

#[actix_web::test]
async fn extreme_years_are_rejected_not_wrapped() {
    let app = test_app!(common::memory_stores());

    for uri in [
        "/api/dashboard/overview?year=-2147483648",
        "/api/dashboard/overview?year=0",
        "/api/financial/analytics?year=10000",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(resp).await["error"], "Year must be between 1 and 9999");
    }

    let req = test::TestRequest::get().uri("/api/dashboard/overview?year=1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .insert_header(ContentType::json())
        .set_payload("{\"employeeId\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn deleting_missing_records_is_not_found() {
    let app = test_app!(common::memory_stores());

    for (uri, message) in [
        ("/api/employees/EMP-404", "Employee not found"),
        ("/api/payroll/EMP-404", "Payroll record not found"),
        ("/api/expenses/999", "Expense record not found"),
        ("/api/expenses/not-a-number", "Expense record not found"),
    ] {
        let req = test::TestRequest::delete().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(resp).await["error"], message);
    }
}

#[actix_web::test]
async fn delete_acknowledges_with_empty_data() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/expenses")
        .set_json(json!({"month": "March", "year": 2024, "officeRent": 60000, "utilities": 8500}))
        .to_request();
    let created = body_json(test::call_service(&app, req).await).await;
    let id = created["data"]["id"].as_u64().expect("id");

    let req = test::TestRequest::delete().uri(&format!("/api/expenses/{id}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"success": true, "message": "Expense record deleted successfully", "data": {}})
    );

    let req = test::TestRequest::delete().uri(&format!("/api/expenses/{id}")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_merges_optional_fields_and_reruns_validation() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({"employeeId": "EMP-9", "name": "Ravi", "email": "ravi@clinic.in", "phone": "12345"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/employees/EMP-9")
        .set_json(json!({"employeeId": "EMP-9", "name": "Ravi K", "email": "ravi@clinic.in", "status": "inactive"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data = body_json(resp).await["data"].clone();
    assert_eq!(data["name"], "Ravi K");
    assert_eq!(data["phone"], "12345");
    assert_eq!(data["status"], "inactive");

    let req = test::TestRequest::put()
        .uri("/api/employees/EMP-9")
        .set_json(json!({"name": "Only a name"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/employees/EMP-404")
        .set_json(json!({"employeeId": "EMP-404", "name": "X", "email": "x@y.io"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn financial_analytics_for_two_months() {
    let app = test_app!(common::memory_stores());

    // February first; analytics must still list January first
    for (month, income, expense) in [("February", 1100, 450), ("January", 1000, 400)] {
        let req = test::TestRequest::post()
            .uri("/api/financial")
            .set_json(json!({"month": month, "year": 2024, "income": income, "expense": expense}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    let req = test::TestRequest::post()
        .uri("/api/financial")
        .set_json(json!({"month": "January", "year": 2023, "income": 5, "expense": 5}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/financial/analytics?year=2024").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data = body_json(resp).await["data"].clone();

    assert_eq!(num(&data["totalIncome"]), 2100.0);
    assert_eq!(num(&data["totalExpense"]), 850.0);
    assert_eq!(num(&data["netIncome"]), 1250.0);

    let summary = data["monthlySummary"].as_array().expect("array");
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0]["month"], "Jan");
    assert_eq!(num(&summary[0]["income"]), 1000.0);
    assert_eq!(num(&summary[0]["expense"]), 400.0);
    assert_eq!(summary[1]["month"], "Feb");
    assert_eq!(num(&summary[1]["income"]), 1100.0);
    assert_eq!(num(&summary[1]["expense"]), 450.0);

    let shares: Vec<u64> = data["expenseBreakdown"]
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["value"].as_u64().expect("share"))
        .collect();
    assert!(shares.iter().sum::<u64>() <= 100);
}

#[actix_web::test]
async fn negative_breakdown_is_rejected_and_shares_stay_bounded() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/financial")
        .set_json(json!({
            "month": "January", "year": 2024, "income": 0, "expense": 50,
            "expenseBreakdown": {"housing": 100, "food": 100, "other": -150}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Financial values must be non-negative");

    let req = test::TestRequest::post()
        .uri("/api/financial")
        .set_json(json!({
            "month": "January", "year": 2024, "income": 0, "expense": 200,
            "expenseBreakdown": {"housing": 100, "food": 100}
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/financial/analytics?year=2024").to_request();
    let data = body_json(test::call_service(&app, req).await).await["data"].clone();
    let shares: Vec<u64> = data["expenseBreakdown"]
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["value"].as_u64().expect("share"))
        .collect();
    assert_eq!(shares, vec![50, 0, 0, 50, 0]);
}

#[actix_web::test]
async fn financial_update_of_unknown_record_is_not_found() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::put()
        .uri("/api/financial/77")
        .set_json(json!({"month": "May", "year": 2024, "income": 1, "expense": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Financial data record not found");
}

#[actix_web::test]
async fn payroll_rows_format_both_fuel_shapes() {
    let app = test_app!(common::memory_stores());

    for (id, fuel) in [
        ("EMP-1", json!(500)),
        ("EMP-2", json!({"amount": 300, "vehicleNumber": "MH12AB1234"})),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/payroll")
            .set_json(json!({
                "employeeId": id,
                "employeeName": "Staff",
                "monthlySalary": 45000,
                "annualPackage": 540000,
                "fuelExpense": fuel,
                "month": "January",
                "year": 2024
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/payroll?month=January&year=2024").to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["count"], 2);

    let rows = body["data"].as_array().expect("array");
    let fuel_of = |id: &str| {
        rows.iter()
            .find(|r| r["id"] == id)
            .map(|r| r["fuelExpense"].clone())
            .expect("row")
    };
    assert_eq!(fuel_of("EMP-1"), "₹500 · Company Shuttle");
    assert_eq!(fuel_of("EMP-2"), "₹300 · MH12AB1234");
    assert_eq!(rows[0]["monthlySalary"], "₹45,000");

    let req = test::TestRequest::get().uri("/api/payroll?year=2023").to_request();
    assert_eq!(body_json(test::call_service(&app, req).await).await["count"], 0);

    let req = test::TestRequest::get().uri("/api/payroll/total-salaries").to_request();
    let totals = body_json(test::call_service(&app, req).await).await["data"].clone();
    assert_eq!(num(&totals["totalFuel"]), 800.0);
    assert_eq!(totals["employeeCount"], 2);
}

#[actix_web::test]
async fn payroll_summary_highest_covers_every_record() {
    let app = test_app!(common::memory_stores());

    for (id, salary) in [("EMP-1", 30000), ("EMP-2", 52000), ("EMP-3", 41000)] {
        let req = test::TestRequest::post()
            .uri("/api/payroll")
            .set_json(json!({
                "employeeId": id,
                "employeeName": id,
                "monthlySalary": salary,
                "annualPackage": salary * 12
            }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/payroll/summary").to_request();
    let data = body_json(test::call_service(&app, req).await).await["data"].clone();
    assert_eq!(num(&data["highestMonthly"]), 52000.0);
    assert_eq!(num(&data["totalMonthly"]), 123000.0);
    assert_eq!(num(&data["averageMonthly"]), 41000.0);
    assert_eq!(data["employeeCount"], 3);
}

#[actix_web::test]
async fn expense_summary_with_no_records() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::get().uri("/api/expenses/summary").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data = body_json(resp).await["data"].clone();

    assert_eq!(num(&data["averageMonthly"]), 0.0);
    assert_eq!(data["monthCount"], 0);
    assert_eq!(num(&data["totalExpenses"]), 0.0);
}

#[actix_web::test]
async fn expenses_list_latest_month_first() {
    let app = test_app!(common::memory_stores());

    for (month, year) in [("January", 2024), ("March", 2024), ("December", 2023)] {
        let req = test::TestRequest::post()
            .uri("/api/expenses")
            .set_json(json!({"month": month, "year": year, "officeRent": 1000, "utilities": 200, "other": 50}))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/expenses").to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let months: Vec<&str> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["month"].as_str().expect("month"))
        .collect();
    assert_eq!(months, ["March", "January", "December"]);
    assert_eq!(body["data"][0]["officeRent"], "₹1,000");

    let req = test::TestRequest::get().uri("/api/expenses/summary").to_request();
    let data = body_json(test::call_service(&app, req).await).await["data"].clone();
    assert_eq!(
        num(&data["totalExpenses"]),
        num(&data["totalOfficeRent"]) + num(&data["totalUtilities"]) + num(&data["totalOther"])
    );
    assert_eq!(num(&data["averageMonthly"]), 1250.0);
}

#[actix_web::test]
async fn dashboard_view_models_have_their_shape() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({"employeeId": "EMP-1", "name": "A", "email": "a@b.co"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/dashboard/overview?year=2024").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let overview = body_json(resp).await["data"].clone();
    assert_eq!(overview["summaryStats"].as_array().map(Vec::len), Some(4));
    assert_eq!(overview["summaryStats"][1]["value"], "1");
    assert_eq!(overview["lifetimeRevenueData"].as_array().map(Vec::len), Some(12));
    assert_eq!(overview["topLineData"], json!([]));

    let req = test::TestRequest::get().uri("/api/dashboard/hiring").to_request();
    let hiring = body_json(test::call_service(&app, req).await).await["data"].clone();
    assert_eq!(hiring["overviewStats"].as_array().map(Vec::len), Some(4));
    assert_eq!(hiring["monthlyMetrics"].as_array().map(Vec::len), Some(6));
    assert_eq!(hiring["funnelData"][0]["value"], 100);
    // hire date defaults to today, so the newest month is filled
    assert_eq!(hiring["monthlyMetrics"][5]["status"], "Filled");
}

#[actix_web::test]
async fn bad_query_value_is_a_validation_error() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::get().uri("/api/financial/analytics?year=last").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["success"], false);
}

#[actix_web::test]
async fn health_banner_and_unknown_routes() {
    let app = test_app!(common::memory_stores());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ok");

    let req = test::TestRequest::get().uri("/").to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["endpoints"]["payroll"], "/api/payroll");

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await,
        json!({"success": false, "error": "Not Found - /api/nowhere"})
    );
}
