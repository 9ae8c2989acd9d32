use inv_admin::{
    AdminError, ProductsPage,
    filter::SortOrder,
    message::MessageKind,
    mutation::Saved,
    view::{Cell, Row},
};
use inv_model::{FieldError, ValidationErrorBody};
use rust_decimal::Decimal;

use crate::common::FakeBackendBuilder;

#[tokio::test]
async fn test_products_example_scenario() {
    let backend = FakeBackendBuilder::new()
        .product(1, "A", 50_000, 2, 1)
        .user(1, "X", "x@x.com")
        .category(1, "Tea")
        .spawn()
        .await;

    let mut page = ProductsPage::new(backend.session());
    page.load().await.expect("Failed to load products page");

    let table = page.table();
    assert_eq!(table.rows.len(), 1);
    let Row::Record { id, cells } = &table.rows[0] else {
        panic!("expected a record row");
    };
    assert_eq!(*id, Some(1));
    assert_eq!(cells[1], Cell::Text("A".to_string()));
    assert_eq!(cells[3].to_string(), "50.000 ₫");
    assert_eq!(cells[4], Cell::Integer(2));
    assert_eq!(cells[5], Cell::Text("X".to_string()));

    page.request_delete(1).unwrap();
    assert_eq!(page.confirm_delete().await.unwrap(), Some(1));

    let table = page.table();
    assert_eq!(table.placeholder_text(), Some("No products found"));
    match &table.rows[0] {
        Row::Placeholder { colspan, .. } => assert_eq!(*colspan, table.columns.len()),
        other => panic!("expected placeholder, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_fans_out_all_three_collections() {
    let backend = FakeBackendBuilder::new().spawn().await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    let mut requests = backend.requests();
    requests.sort();
    assert_eq!(
        requests,
        vec!["GET /api/categories", "GET /api/products", "GET /api/users"]
    );
    // No data, no message left behind
    assert!(page.session().banner().peek().is_none());
}

#[tokio::test]
async fn test_load_fails_as_a_unit() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Matcha", 45_000, 3, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    backend.fail("/api/categories");
    backend.state().products.clear();

    let err = page.load().await.unwrap_err();
    assert!(matches!(err, AdminError::Fetch(_)));
    // Previous data kept, nothing partially replaced
    assert_eq!(page.products().len(), 1);

    let message = page.session().banner().peek().unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert!(message.text.starts_with("Failed to load data"));
}

#[tokio::test]
async fn test_create_adds_exactly_one_matching_row() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Sencha", 30_000, 5, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();
    let before = page.table().record_count();

    page.show_add_modal();
    let draft = page.form_mut().draft_mut();
    draft.title = "Ceremonial matcha".to_string();
    draft.description = "Stone ground".to_string();
    draft.price = "125000.50".to_string();
    draft.quantity = "40".to_string();
    draft.user_id = Some(1);

    let saved = page.submit().await.expect("Failed to create product");
    let Saved::Created(id) = saved else {
        panic!("expected a create, got {saved:?}");
    };

    assert!(!page.form().is_open());
    assert_eq!(page.table().record_count(), before + 1);

    let created = page.products().iter().find(|p| p.id == id).unwrap();
    assert_eq!(created.title, "Ceremonial matcha");
    assert_eq!(created.description.as_deref(), Some("Stone ground"));
    assert_eq!(created.price, Decimal::new(12_500_050, 2));
    assert_eq!(created.quantity, 40);
    assert_eq!(created.user_id, Some(1));

    let message = page.session().banner().peek().unwrap();
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, "Product created successfully!");
}

#[tokio::test]
async fn test_edit_updates_the_targeted_record() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Sencha", 30_000, 5, 1)
        .product(2, "Gyokuro", 90_000, 1, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    page.edit(2).unwrap();
    assert_eq!(page.form().draft().title, "Gyokuro");
    page.form_mut().draft_mut().quantity = "8".to_string();

    assert_eq!(page.submit().await.unwrap(), Saved::Updated(2));
    assert!(backend.requests().contains(&"PUT /api/products/2".to_string()));

    let quantities: Vec<(i64, i32)> = page.products().iter().map(|p| (p.id, p.quantity)).collect();
    assert_eq!(quantities, vec![(1, 5), (2, 8)]);
    assert_eq!(
        page.session().banner().peek().unwrap().text,
        "Product updated successfully!"
    );
}

#[tokio::test]
async fn test_client_validation_blocks_network_call() {
    let backend = FakeBackendBuilder::new()
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();
    backend.clear_requests();

    let cases: [(&str, fn(&mut inv_admin::validation::ProductDraft)); 4] = [
        ("title", |d| d.title = "ab".to_string()),
        ("price", |d| d.price = "0".to_string()),
        ("quantity", |d| d.quantity = "10001".to_string()),
        ("userId", |d| d.user_id = None),
    ];

    for (field, break_field) in cases {
        page.show_add_modal();
        let draft = page.form_mut().draft_mut();
        draft.title = "Valid title".to_string();
        draft.price = "1000".to_string();
        draft.quantity = "1".to_string();
        draft.user_id = Some(1);
        break_field(page.form_mut().draft_mut());

        let err = page.submit().await.unwrap_err();
        let AdminError::Validation(failure) = err else {
            panic!("expected validation failure for {field}, got {err:?}");
        };
        assert_eq!(failure.fields.len(), 1, "only {field} should fail");

        let annotations = page.form().annotations();
        assert_eq!(annotations.len(), 1);
        assert!(annotations.get(field).is_some(), "{field} should be annotated");
        assert!(page.form().is_open());
    }

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_server_field_errors_are_annotated() {
    let backend = FakeBackendBuilder::new()
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    backend.reject_next(ValidationErrorBody {
        message: Some("Validation failed".to_string()),
        status: Some(400),
        error: Some("Bad Request".to_string()),
        field_errors: vec![FieldError::new("title", "Title already exists")],
    });

    page.show_add_modal();
    let draft = page.form_mut().draft_mut();
    draft.title = "Sencha".to_string();
    draft.price = "30000".to_string();
    draft.quantity = "1".to_string();
    draft.user_id = Some(1);

    let err = page.submit().await.unwrap_err();
    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(
        page.form().annotations().get("title"),
        Some("Title already exists")
    );
    assert!(page.form().is_open());
    assert!(page.products().is_empty());
}

#[tokio::test]
async fn test_server_message_without_fields_goes_to_banner() {
    let backend = FakeBackendBuilder::new()
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    backend.reject_next(ValidationErrorBody {
        message: Some("Owner is locked".to_string()),
        ..Default::default()
    });

    page.show_add_modal();
    let draft = page.form_mut().draft_mut();
    draft.title = "Sencha".to_string();
    draft.price = "30000".to_string();
    draft.quantity = "1".to_string();
    draft.user_id = Some(1);

    assert!(page.submit().await.is_err());
    assert!(page.form().annotations().is_empty());
    let message = page.session().banner().peek().unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, "Owner is locked");
}

#[tokio::test]
async fn test_delete_removes_only_the_target() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Sencha", 30_000, 5, 1)
        .product(2, "Gyokuro", 90_000, 1, 1)
        .product(3, "Bancha", 20_000, 9, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    page.request_delete(2).unwrap();
    assert_eq!(page.confirm_delete().await.unwrap(), Some(2));

    assert_eq!(page.table().record_ids(), vec![1, 3]);
    assert_eq!(page.pending_delete(), None);
    assert_eq!(
        page.session().banner().peek().unwrap().text,
        "Product deleted successfully!"
    );

    // Nothing armed: no request goes out
    backend.clear_requests();
    assert_eq!(page.confirm_delete().await.unwrap(), None);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_failed_delete_stays_armed() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Sencha", 30_000, 5, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    backend.fail("/api/products/1");
    page.request_delete(1).unwrap();

    let err = page.confirm_delete().await.unwrap_err();
    assert!(matches!(err, AdminError::Mutation(_)));
    assert_eq!(page.pending_delete(), Some(1));
    assert_eq!(
        page.session().banner().peek().unwrap().text,
        "Failed to delete product: HTTP error! status: 500"
    );
}

#[tokio::test]
async fn test_sort_then_refresh_restores_backend_order() {
    let backend = FakeBackendBuilder::new()
        .product(1, "Sencha", 30_000, 5, 1)
        .product(2, "Gyokuro", 90_000, 1, 1)
        .product(3, "Bancha", 20_000, 9, 1)
        .user(1, "An", "an@example.com")
        .spawn()
        .await;
    let mut page = ProductsPage::new(backend.session());
    page.load().await.unwrap();

    assert_eq!(page.sort_by_price(SortOrder::Asc).record_ids(), vec![3, 1, 2]);

    page.refresh().await.unwrap();
    assert_eq!(page.table().record_ids(), vec![1, 2, 3]);
    assert_eq!(
        page.session().banner().peek().unwrap().text,
        "Data refreshed successfully!"
    );
}
