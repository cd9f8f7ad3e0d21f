use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::entities::filter::{Dimension, FilterSet};
use crate::domain::entities::view::{ChartPoint, View};
use crate::infra::fetch::test_server::{direct_client, serve_once};
use crate::infra::source_reader::LocalOrRemoteReader;
use crate::usecase::ports::source::SourceLocation;
use crate::usecase::services::load_service::{DatasetSources, LoadError, LoadService};
use crate::usecase::services::query_service::{apply_filters, brand_options, QueryService};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("sales-dashboard-{prefix}-{nanos}"))
}

fn write_fixture(dir: &Path, name: &str, contents: &str) -> SourceLocation {
    let path = dir.join(name);
    fs::write(&path, contents).expect("should write csv fixture");
    SourceLocation::Path(path)
}

fn lojas_xlsx() -> SourceLocation {
    SourceLocation::Path(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lojas.xlsx"))
}

fn write_dataset(dir: &Path) -> DatasetSources {
    DatasetSources {
        sales: write_fixture(
            dir,
            "vendas.csv",
            "Data da Venda,SKU,ID Loja,ID Cliente,Qtd Vendida\n\
             2021-03-01,A1,1,10,5\n\
             2021-08-15,B2,1,11,3\n\
             2022-01-20,A1,2,10,2\n\
             2022-02-02,C3,2,12,4\n\
             2023-05-05,Z9,7,99,1\n",
        ),
        customers: write_fixture(
            dir,
            "clientes.csv",
            ",,,\n\
             Cadastro de Clientes,,,\n\
             ID Cliente,Primeiro Nome,Sobrenome,Email\n\
             10,Ana,,ana@example.com\n\
             11,Bruno,Costa,bruno@example.com\n\
             12,Carla,Dias,\n",
        ),
        stores: lojas_xlsx(),
        products: write_fixture(
            dir,
            "produtos.csv",
            "SKU,Produto,Tipo do Produto,Marca\n\
             A1,Notebook,Eletrônicos,X\n\
             B2,Celular,Eletrônicos,Y\n\
             C3,Cadeira,Móveis,Z\n",
        ),
    }
}

fn load_service() -> LoadService {
    LoadService::new(Arc::new(
        LocalOrRemoteReader::new(None).expect("reader should build"),
    ))
}

#[test]
fn loads_and_joins_mixed_csv_and_xlsx_sources() {
    let temp_dir = unique_test_dir("e2e-load");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let sources = write_dataset(&temp_dir);

    let table = load_service().load(&sources).expect("load should succeed");

    assert_eq!(table.len(), 5, "fact rows should equal sale rows");
    assert_eq!(table.total_quantity(), 15);

    let first = &table.rows()[0];
    assert_eq!(first.customer_name, "Ana ");
    assert_eq!(first.store_name.as_deref(), Some("Centro"));
    assert_eq!(first.brand.as_deref(), Some("X"));

    let unmatched = &table.rows()[4];
    assert_eq!(unmatched.store_name, None);
    assert_eq!(unmatched.product_name, None);
    assert_eq!(unmatched.customer_name, " ");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn every_view_recomputes_from_loaded_data() {
    let temp_dir = unique_test_dir("e2e-views");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let sources = write_dataset(&temp_dir);
    let service = QueryService::new(Arc::new(
        load_service().load(&sources).expect("load should succeed"),
    ));
    let none = FilterSet::new();

    assert_eq!(
        service.recompute(View::SalesByYear, &none).points,
        vec![
            ChartPoint::new("2021", 8),
            ChartPoint::new("2022", 6),
            ChartPoint::new("2023", 1),
        ]
    );
    assert_eq!(
        service.recompute(View::SalesByStore, &none).points,
        vec![
            ChartPoint::new("", 1),
            ChartPoint::new("Centro", 8),
            ChartPoint::new("Norte", 6),
        ]
    );
    assert_eq!(
        service.recompute(View::TopCustomers, &none).points,
        vec![
            ChartPoint::new("Ana ", 7),
            ChartPoint::new("Carla Dias", 4),
            ChartPoint::new("Bruno Costa", 3),
            ChartPoint::new(" ", 1),
        ]
    );
    assert_eq!(
        service.recompute(View::TopProducts, &none).points,
        vec![
            ChartPoint::new("Notebook", 7),
            ChartPoint::new("Cadeira", 4),
            ChartPoint::new("Celular", 3),
            ChartPoint::new("", 1),
        ]
    );
    assert_eq!(
        service.recompute(View::BrandDistribution, &none).total(),
        service.table().total_quantity()
    );
    assert_eq!(
        service.recompute(View::SalesByProductType, &none).points,
        vec![
            ChartPoint::new("", 1),
            ChartPoint::new("Eletrônicos", 10),
            ChartPoint::new("Móveis", 4),
        ]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn filters_compose_and_cascade_on_loaded_data() {
    let temp_dir = unique_test_dir("e2e-filters");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let sources = write_dataset(&temp_dir);
    let table = load_service().load(&sources).expect("load should succeed");

    let centro_x = FilterSet::new()
        .with(Dimension::StoreName, "Centro")
        .with(Dimension::Brand, "X");
    let rows = apply_filters(&table, &centro_x);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 5);

    assert_eq!(brand_options(&table, Some("Eletrônicos")), vec!["X", "Y"]);
    assert_eq!(brand_options(&table, Some("Móveis")), vec!["Z"]);
    assert!(brand_options(&table, None).is_empty());

    let service = QueryService::new(Arc::new(table));
    let nowhere = FilterSet::new().with(Dimension::StoreName, "Sul");
    assert!(service.recompute(View::TopProducts, &nowhere).is_empty());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn any_missing_source_aborts_the_load() {
    let temp_dir = unique_test_dir("e2e-missing");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let mut sources = write_dataset(&temp_dir);
    sources.products = SourceLocation::Path(temp_dir.join("absent.csv"));

    let err = load_service().load(&sources).expect_err("load should fail");

    assert!(matches!(err, LoadError::Source { table: "products", .. }));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn bad_sale_date_aborts_the_load() {
    let temp_dir = unique_test_dir("e2e-bad-date");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let mut sources = write_dataset(&temp_dir);
    sources.sales = write_fixture(
        &temp_dir,
        "vendas-ruins.csv",
        "Data da Venda,SKU,ID Loja,ID Cliente,Qtd Vendida\nsem data,A1,1,10,5\n",
    );

    let err = load_service().load(&sources).expect_err("load should fail");

    assert!(matches!(err, LoadError::InvalidDate { row: 1, .. }));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn remote_store_source_joins_like_a_local_one() {
    let temp_dir = unique_test_dir("e2e-remote");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let mut sources = write_dataset(&temp_dir);
    let base = serve_once("200 OK", "ID Loja,Nome da Loja,Cidade\n1.0,Centro,Recife\n2,Norte,Belém\n");
    sources.stores = SourceLocation::parse(&format!("{base}/lojas.csv"));

    let table = LoadService::new(Arc::new(LocalOrRemoteReader::with_client(direct_client())))
        .load(&sources)
        .expect("load should succeed");
    let service = QueryService::new(Arc::new(table));

    assert_eq!(
        service.recompute(View::SalesByStore, &FilterSet::new()).points,
        vec![
            ChartPoint::new("", 1),
            ChartPoint::new("Centro", 8),
            ChartPoint::new("Norte", 6),
        ]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
