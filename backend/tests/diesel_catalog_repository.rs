//! Integration tests for the Diesel category and product repositories.
//!
//! Each test runs against its own database cloned from a migrated template
//! on a shared embedded PostgreSQL cluster, so `SERIAL` ids start at 1.

use std::sync::Arc;

use catalog::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ProductCommand, ProductRepository,
    ProductRepositoryError, UpdateProductRequest,
};
use catalog::domain::{
    CatalogName, CategoryPatch, CategoryRef, CategoryTree, ErrorCode, NAME_MAX, NewCategory,
    NewProduct, NodeKind, Price, ProductPatch, ProductService, ProductSummary, build_flat_tree,
    build_product_tree,
};
use catalog::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselProductRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{
    format_postgres_error, handle_cluster_setup_failure, provision_template_database,
    shared_cluster_handle,
};

struct TestContext {
    runtime: Runtime,
    categories: DieselCategoryRepository,
    products: DieselProductRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle()?;
    let temp_db = provision_template_database(cluster)?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(database_url.as_str()).with_max_size(2);
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        categories: DieselCategoryRepository::new(pool.clone()),
        products: DieselProductRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn new_category(name: &str, parent_id: Option<i32>) -> NewCategory {
    NewCategory::new(CatalogName::new(name).expect("valid name"), parent_id).expect("slug derives")
}

fn new_product(name: &str, price: f64, category_id: i32) -> NewProduct {
    NewProduct::new(
        CatalogName::new(name).expect("valid name"),
        Price::new(price).expect("valid price"),
        category_id,
    )
    .expect("slug derives")
}

/// Electronics (1) > Phones (2) owning X1 (product 1) at 199.99.
fn seed_electronics(ctx: &TestContext) {
    ctx.runtime.block_on(async {
        let electronics = ctx
            .categories
            .insert(&new_category("Electronics", None))
            .await
            .expect("insert Electronics");
        assert_eq!((electronics.id, electronics.slug.as_str()), (1, "electronics"));

        let phones = ctx
            .categories
            .insert(&new_category("Phones", Some(1)))
            .await
            .expect("insert Phones");
        assert_eq!((phones.id, phones.slug.as_str()), (2, "phones"));

        let x1 = ctx
            .products
            .insert(&new_product("X1", 199.99, 2))
            .await
            .expect("insert X1");
        assert_eq!(x1.id, 1);
    });
}

fn query_one<T>(url: &str, sql: &str, id: i32) -> T
where
    T: for<'a> postgres::types::FromSql<'a>,
{
    let mut client = Client::connect(url, NoTls)
        .map_err(|err| format_postgres_error(&err))
        .expect("connect");
    client
        .query_one(sql, &[&id])
        .map_err(|err| format_postgres_error(&err))
        .expect("row exists")
        .get(0)
}

#[rstest]
fn created_category_has_no_parent_and_no_products(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: created_category_has_no_parent_and_no_products skipped");
        return;
    };

    let view = ctx.runtime.block_on(async {
        let created = ctx
            .categories
            .insert(&new_category("Garden", None))
            .await
            .expect("insert");
        ctx.categories
            .find_by_id(created.id)
            .await
            .expect("find")
            .expect("category exists")
    });

    assert_eq!(view.name, "Garden");
    assert!(view.is_active);
    assert!(view.parent.is_none());
    assert!(view.product_ids.is_empty());
}

#[rstest]
fn views_resolve_parents_and_owned_products(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: views_resolve_parents_and_owned_products skipped");
        return;
    };
    seed_electronics(&ctx);

    let (listed, product) = ctx.runtime.block_on(async {
        ctx.products
            .insert(&new_product("X2", 299.0, 2))
            .await
            .expect("insert X2");
        let listed = ctx.categories.list_active().await.expect("list");
        let product = ctx
            .products
            .find_by_id(1)
            .await
            .expect("find")
            .expect("product exists");
        (listed, product)
    });

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].parent, None);
    assert!(listed[0].product_ids.is_empty());
    assert_eq!(
        listed[1].parent,
        Some(CategoryRef {
            id: 1,
            name: "Electronics".to_owned(),
        })
    );
    assert_eq!(listed[1].product_ids, vec![1, 2]);
    assert_eq!(product.category_name.as_deref(), Some("Phones"));
}

#[rstest]
fn snapshot_builds_the_nested_tree(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: snapshot_builds_the_nested_tree skipped");
        return;
    };
    seed_electronics(&ctx);

    let snapshot = ctx
        .runtime
        .block_on(async { ctx.categories.snapshot().await })
        .expect("snapshot");
    let tree = build_product_tree(&snapshot, 1).expect("tree builds");

    assert_eq!(
        tree,
        CategoryTree {
            id: 1,
            name: "Electronics".to_owned(),
            products: vec![],
            children: vec![CategoryTree {
                id: 2,
                name: "Phones".to_owned(),
                products: vec![ProductSummary {
                    id: 1,
                    name: "X1".to_owned(),
                    price: 199.99,
                }],
                children: vec![],
            }],
        }
    );
}

#[rstest]
fn deactivated_category_leaves_tree_but_not_flat_tree(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deactivated_category_leaves_tree_but_not_flat_tree skipped");
        return;
    };
    seed_electronics(&ctx);

    let snapshot = ctx.runtime.block_on(async {
        let patch = CategoryPatch {
            is_active: Some(false),
            ..CategoryPatch::default()
        };
        let updated = ctx
            .categories
            .update(2, &patch)
            .await
            .expect("update")
            .expect("category exists");
        assert!(!updated.is_active);
        ctx.categories.snapshot().await.expect("snapshot")
    });

    let tree = build_product_tree(&snapshot, 1).expect("tree builds");
    assert!(tree.children.is_empty());

    let flat = build_flat_tree(&snapshot);
    let kinds: Vec<(NodeKind, i32)> = flat.iter().map(|node| (node.kind, node.id)).collect();
    assert_eq!(
        kinds,
        vec![
            (NodeKind::Category, 1),
            (NodeKind::Category, 2),
            (NodeKind::Product, 1),
        ]
    );
}

#[rstest]
fn explicit_null_parent_is_stored_as_null(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: explicit_null_parent_is_stored_as_null skipped");
        return;
    };
    seed_electronics(&ctx);

    let detached = ctx
        .runtime
        .block_on(async {
            let patch = CategoryPatch {
                parent_id: Some(None),
                ..CategoryPatch::default()
            };
            ctx.categories.update(2, &patch).await
        })
        .expect("update")
        .expect("category exists");

    assert_eq!(detached.parent_id, None);
    assert_eq!(detached.parent, None);
    let stored: Option<i32> = query_one(
        &ctx.database_url,
        "SELECT parent_id FROM categories WHERE id = $1",
        2,
    );
    assert_eq!(stored, None);
}

#[rstest]
fn category_rename_keeps_the_stored_slug(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: category_rename_keeps_the_stored_slug skipped");
        return;
    };
    seed_electronics(&ctx);

    let renamed = ctx
        .runtime
        .block_on(async {
            let patch = CategoryPatch {
                name: Some(CatalogName::new("Mobile Phones").expect("valid name")),
                ..CategoryPatch::default()
            };
            ctx.categories.update(2, &patch).await
        })
        .expect("update")
        .expect("category exists");

    assert_eq!(renamed.name, "Mobile Phones");
    assert_eq!(renamed.slug, "phones");
    assert_eq!(renamed.product_ids, vec![1]);
}

#[rstest]
fn empty_category_patch_returns_current_row(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: empty_category_patch_returns_current_row skipped");
        return;
    };
    seed_electronics(&ctx);

    let (unchanged, current, missing) = ctx.runtime.block_on(async {
        let patch = CategoryPatch::default();
        (
            ctx.categories.update(2, &patch).await.expect("update"),
            ctx.categories.find_by_id(2).await.expect("find"),
            ctx.categories.update(99, &patch).await.expect("update"),
        )
    });

    assert!(unchanged.is_some());
    assert_eq!(unchanged, current);
    assert!(missing.is_none());
}

#[rstest]
fn empty_product_update_is_rejected_without_mutation(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: empty_product_update_is_rejected_without_mutation skipped");
        return;
    };
    seed_electronics(&ctx);
    let service = ProductService::new(Arc::new(ctx.products.clone()));

    let (rejected, unchanged, missing) = ctx.runtime.block_on(async {
        let rejected = service
            .update(1, UpdateProductRequest::default())
            .await
            .expect_err("empty update is rejected");
        let unchanged = ctx
            .products
            .update(1, &ProductPatch::default())
            .await
            .expect("update");
        let missing = ctx
            .products
            .update(99, &ProductPatch::default())
            .await
            .expect("update");
        (rejected, unchanged, missing)
    });

    assert_eq!(rejected.code(), ErrorCode::InvalidRequest);
    let unchanged = unchanged.expect("product exists");
    assert_eq!(unchanged.price, 199.99);
    assert_eq!(unchanged.category_name.as_deref(), Some("Phones"));
    assert!(missing.is_none());
}

#[rstest]
fn product_update_moves_category_and_reslugs(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: product_update_moves_category_and_reslugs skipped");
        return;
    };
    seed_electronics(&ctx);

    let (moved, missing) = ctx.runtime.block_on(async {
        let patch = ProductPatch::new(
            Some(CatalogName::new("X1 Pro").expect("valid name")),
            Some(Price::new(249.5).expect("valid price")),
            Some(1),
        )
        .expect("slug derives");
        (
            ctx.products.update(1, &patch).await.expect("update"),
            ctx.products.update(99, &patch).await.expect("update"),
        )
    });

    let moved = moved.expect("product exists");
    assert_eq!(moved.name, "X1 Pro");
    assert_eq!(moved.price, 249.5);
    assert_eq!(moved.category_id, 1);
    assert_eq!(moved.category_name.as_deref(), Some("Electronics"));
    assert!(missing.is_none());
    let slug: String = query_one(
        &ctx.database_url,
        "SELECT slug FROM products WHERE id = $1",
        1,
    );
    assert_eq!(slug, "x1-pro");
}

#[rstest]
fn deleting_a_root_cascades_through_the_subtree(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_root_cascades_through_the_subtree skipped");
        return;
    };
    seed_electronics(&ctx);

    ctx.runtime.block_on(async {
        assert!(ctx.categories.delete(1).await.expect("delete"));
        assert!(ctx.categories.find_by_id(2).await.expect("find").is_none());
        assert!(ctx.products.find_by_id(1).await.expect("find").is_none());
        assert!(!ctx.categories.delete(1).await.expect("delete again"));
        assert!(!ctx.products.delete(1).await.expect("delete product"));
    });
}

#[rstest]
fn constraint_violations_are_integrity_errors(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: constraint_violations_are_integrity_errors skipped");
        return;
    };
    seed_electronics(&ctx);

    let (duplicate, orphan_category, orphan_product) = ctx.runtime.block_on(async {
        (
            ctx.categories
                .insert(&new_category("Phones", None))
                .await
                .expect_err("duplicate slug"),
            ctx.categories
                .insert(&new_category("Tablets", Some(42)))
                .await
                .expect_err("missing parent"),
            ctx.products
                .insert(&new_product("Y1", 10.0, 42))
                .await
                .expect_err("missing category"),
        )
    });

    assert!(matches!(duplicate, CategoryRepositoryError::Integrity { .. }));
    assert!(matches!(
        orphan_category,
        CategoryRepositoryError::Integrity { .. }
    ));
    assert!(matches!(
        orphan_product,
        ProductRepositoryError::Integrity { .. }
    ));
}

#[rstest]
fn longest_cyrillic_names_fit_the_slug_columns(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: longest_cyrillic_names_fit_the_slug_columns skipped");
        return;
    };
    let name = "щ".repeat(NAME_MAX);

    let (category, product) = ctx.runtime.block_on(async {
        let category = ctx
            .categories
            .insert(&new_category(&name, None))
            .await
            .expect("insert category");
        let product = ctx
            .products
            .insert(&new_product(&name, 1.0, category.id))
            .await
            .expect("insert product");
        (category, product)
    });

    assert_eq!(category.slug.len(), 4 * NAME_MAX);
    assert_eq!(category.name, name);
    assert_eq!(product.name, name);
}

#[rstest]
fn missing_products_table_surfaces_query_errors(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_products_table_surfaces_query_errors skipped");
        return;
    };
    let mut client = Client::connect(&ctx.database_url, NoTls)
        .map_err(|err| format_postgres_error(&err))
        .expect("connect");
    client
        .batch_execute("DROP TABLE products")
        .map_err(|err| format_postgres_error(&err))
        .expect("drop table succeeds");

    let error = ctx
        .runtime
        .block_on(async { ctx.products.list_active().await })
        .expect_err("listing fails without the table");

    assert!(matches!(error, ProductRepositoryError::Query { .. }));
}

#[rstest]
fn template_database_is_fully_migrated(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: template_database_is_fully_migrated skipped");
        return;
    };

    let applied = ctx
        .runtime
        .block_on(run_pending_migrations(&ctx.database_url))
        .expect("migrations run");

    assert_eq!(applied, 0);
}
