//! End-to-end lookup workflows.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use library_lookup::format::format_display;
use library_lookup::library::FieldKey;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::ResponseTemplate;

use super::{client_for, full_body, start_service};

#[tokio::test]
async fn test_masked_lookup_renders_in_canonical_order() {
    let server = start_service(ResponseTemplate::new(200).set_body_json(full_body())).await;
    let client = client_for(&server, true);

    let record = client.fetch("13812345678").await.expect("record");
    let lines = client.format_display(&record);

    assert_eq!(
        lines,
        vec![
            "姓名：张三 | 张叁",
            "昵称：小张",
            "号码：138****5678 | 联系电话139****5678转8",
            "身份证：110101********1234 | 110101******123",
            "密码：hunter2",
            "邮箱：zhangsan@example.com",
            "地址：北京市东城区",
        ]
    );
    client.close();
}

#[tokio::test]
async fn test_unmasked_lookup_keeps_raw_values() {
    let server = start_service(ResponseTemplate::new(200).set_body_json(full_body())).await;
    let client = client_for(&server, false);

    let record = client.fetch("张三").await.expect("record");

    assert_eq!(
        record.get(FieldKey::PhoneNumbers).unwrap(),
        ["13812345678", "联系电话13912345678转8"]
    );
    assert_eq!(
        record.get(FieldKey::IdNumbers).unwrap(),
        ["110101199003071234", "110101900307123"]
    );
    assert!(record.get(FieldKey::WbNumbers).is_none());
    client.close();
}

#[tokio::test]
async fn test_unlabeled_field_is_fetched_but_not_displayed() {
    let body = json!({"data": {"qq_numbers": ["10001"]}});
    let server = start_service(ResponseTemplate::new(200).set_body_json(body)).await;
    let client = client_for(&server, true);

    let record = client.fetch("10001").await.expect("record");

    assert_eq!(record.keys().collect::<Vec<_>>(), vec![FieldKey::QqNumbers]);
    assert!(format_display(&record).is_empty());
    client.close();
}

#[tokio::test]
async fn test_sanitized_record_json_shape() {
    let server = start_service(ResponseTemplate::new(200).set_body_json(full_body())).await;
    let client = client_for(&server, true);

    let record = client.fetch("13812345678").await.expect("record");
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["phone_numbers"][0], "138****5678");
    assert_eq!(value["qq_numbers"][0], "10001");
    assert!(value.get("wb_numbers").is_none());
    client.close();
}
