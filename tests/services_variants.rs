use std::io::Write;

use actix_multipart::form::tempfile::TempFile;
use pushkind_common::domain::auth::AuthenticatedUser;
use printshop::SERVICE_ACCESS_ROLE;
use printshop::domain::attribute::NewAttributeType;
use printshop::domain::category::NewCategory;
use printshop::domain::pricing::{CustomerTier, PriceTriple};
use printshop::domain::product::NewProduct;
use printshop::forms::orders::PlaceOrderForm;
use printshop::forms::variants::{SaveVariantsForm, UploadVariantsForm};
use printshop::repository::{
    AttributeTypeWriter, CategoryWriter, CustomerWriter, DieselRepository, ProductReader,
    ProductWriter,
};
use printshop::services::products::{self, VariantSyncSummary};
use printshop::services::{ServiceError, orders, storefront};

mod common;

fn staff() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "staff".into(),
        email: "staff@example.com".into(),
        hub_id: 1,
        name: "Staff".into(),
        roles: vec![SERVICE_ACCESS_ROLE.to_string()],
        exp: 0,
    }
}

fn shopper() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "shopper".into(),
        email: "ann@example.com".into(),
        hub_id: 1,
        name: "Ann".into(),
        roles: Vec::new(),
        exp: 0,
    }
}

fn csv_upload(contents: &str) -> UploadVariantsForm {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");

    UploadVariantsForm {
        csv: TempFile {
            file,
            content_type: None,
            file_name: Some("variants.csv".to_string()),
            size: contents.len(),
        },
    }
}

struct Catalogue {
    repo: DieselRepository,
    product_id: i32,
    weight_id: i32,
    finish_id: i32,
}

fn seed(test_db: &common::TestDb) -> Catalogue {
    let repo = DieselRepository::new(test_db.pool());
    let cards = repo.create_category(&NewCategory::new(1, "Cards")).unwrap();
    let weight = repo
        .create_attribute_type(&NewAttributeType::new(1, cards.id, "Paper Weight"))
        .unwrap();
    let finish = repo
        .create_attribute_type(&NewAttributeType::new(1, cards.id, "Finish"))
        .unwrap();
    let product = repo
        .create_product(&NewProduct::new(
            1,
            cards.id,
            "Business Cards",
            1000,
            PriceTriple::new(5000, 5500, 6000).unwrap(),
        ))
        .unwrap();

    Catalogue {
        repo,
        product_id: product.id,
        weight_id: weight.id,
        finish_id: finish.id,
    }
}

#[test]
fn csv_import_then_form_save_reconciles_variants() {
    let test_db = common::TestDb::new("service_csv_import_then_form_save.db");
    let catalogue = seed(&test_db);
    let repo = &catalogue.repo;

    let upload = csv_upload(
        "sku,min_qty,min_price,avg_price,max_price,og_price,is_available,paper weight,Finish\n\
         BC-300,1000,50,55,60,,,300 GSM,Matte\n\
         BC-350,1000,53.79,58,62.5,70,yes,350 GSM,Matte\n",
    );
    let summary = products::import_variants(repo, &staff(), catalogue.product_id, upload)
        .expect("import variants");
    assert_eq!(
        summary,
        VariantSyncSummary {
            created: 2,
            updated: 0,
            deleted: 0
        }
    );

    let product = repo.get_product_by_id(catalogue.product_id, 1).unwrap().unwrap();
    assert_eq!(product.variants.len(), 2);
    assert_eq!(product.variants[1].details.prices.min_price_cents, 5379);
    assert_eq!(product.variants[0].details.og_price_cents, 6000);

    let body = format!(
        "variants[0][sku]=BC-350&variants[0][min_qty]=1000&variants[0][min_price]=53.79\
         &variants[0][avg_price]=58&variants[0][max_price]=62.5&variants[0][og_price]=70\
         &variants[0][is_available]=on\
         &variants[0][options][0][attribute_type_id]={weight}&variants[0][options][0][value]=350%20GSM\
         &variants[0][options][1][attribute_type_id]={finish}&variants[0][options][1][value]=Glossy\
         &variants[1][sku]=BC-400&variants[1][min_qty]=500&variants[1][min_price]=40\
         &variants[1][avg_price]=45&variants[1][max_price]=50",
        weight = catalogue.weight_id,
        finish = catalogue.finish_id,
    );
    let form = SaveVariantsForm::from_body(&body).expect("parse nested form");
    let summary =
        products::save_variants(repo, &staff(), catalogue.product_id, form).expect("save variants");
    assert_eq!(
        summary,
        VariantSyncSummary {
            created: 1,
            updated: 1,
            deleted: 1
        }
    );

    let editor = products::load_product_editor(repo, &staff(), catalogue.product_id)
        .expect("load editor");
    let skus: Vec<&str> = editor.product.variants.iter().map(|v| v.sku()).collect();
    assert_eq!(skus, vec!["BC-350", "BC-400"]);
    assert!(!editor.product.variants[1].details.is_available);
    assert_eq!(editor.attributes.len(), 2);
    assert_eq!(editor.attributes[1].values, vec!["Glossy"]);
}

#[test]
fn csv_import_with_unknown_column_changes_nothing() {
    let test_db = common::TestDb::new("service_csv_import_unknown_column.db");
    let catalogue = seed(&test_db);

    let upload = csv_upload(
        "sku,min_qty,min_price,avg_price,max_price,Color\n\
         BC-300,1000,50,55,60,Red\n",
    );
    let result = products::import_variants(&catalogue.repo, &staff(), catalogue.product_id, upload);

    assert!(matches!(result, Err(ServiceError::Form(message)) if message.contains("Color")));
    let product = catalogue
        .repo
        .get_product_by_id(catalogue.product_id, 1)
        .unwrap()
        .unwrap();
    assert!(product.variants.is_empty());
}

#[test]
fn customer_checkout_uses_tier_price() {
    let test_db = common::TestDb::new("service_customer_checkout_uses_tier_price.db");
    let catalogue = seed(&test_db);
    let repo = &catalogue.repo;

    let upload = csv_upload(
        "sku,min_qty,min_price,avg_price,max_price\n\
         BC-300,1000,50,55,60\n",
    );
    products::import_variants(repo, &staff(), catalogue.product_id, upload).expect("import");

    assert!(matches!(
        storefront::load_product_details(repo, &shopper(), catalogue.product_id),
        Err(ServiceError::Unauthorized)
    ));

    let customer = repo
        .create_customer(
            &printshop::domain::customer::NewCustomer::new(
                1,
                "Ann Lee",
                "Lee Prints",
                "ann@example.com",
                "5551234567",
            )
            .with_tier(CustomerTier::High),
        )
        .unwrap();

    let details = storefront::load_product_details(repo, &shopper(), catalogue.product_id)
        .expect("product details");
    assert_eq!(details.tier, CustomerTier::High);
    assert_eq!(details.variants[0].price_cents, 6000);
    let variant_id = details.selected_variant_id.expect("preselected variant");

    let order = orders::place_order(
        repo,
        &shopper(),
        PlaceOrderForm {
            product_id: catalogue.product_id,
            variant_id,
            quantity: 1500,
            notes: None,
        },
    )
    .expect("place order");
    assert_eq!(order.customer_id, customer.id);
    assert_eq!(order.unit_price_cents, 6000);
    assert_eq!(order.total_cents, 9000);

    let cancelled = orders::cancel_my_order(repo, &shopper(), order.id).expect("cancel order");
    assert_eq!(cancelled.status.as_str(), "cancelled");
}
