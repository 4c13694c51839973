use catalog_select::{
    CatalogApi, CatalogItem, ItemGroup, OptionsAction, Result, SearchPage, SelectOption, Signal,
};
use futures::future::{self, BoxFuture, FutureExt};
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    pub(crate) Api {}

    impl CatalogApi for Api {
        fn search(&self, query: String) -> BoxFuture<'static, Result<SearchPage>>;
        fn set_to_buy(&self, id: u64, to_buy: bool) -> BoxFuture<'static, Result<CatalogItem>>;
    }
}

pub(crate) fn item(pk: u64, name: &str, to_buy: bool, groups: &[&str]) -> CatalogItem {
    CatalogItem {
        pk,
        name: name.to_string(),
        to_buy,
        group: groups
            .iter()
            .map(|title| ItemGroup {
                title: title.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn page_of(results: Vec<CatalogItem>) -> BoxFuture<'static, Result<SearchPage>> {
    future::ok(SearchPage {
        count: results.len() as u64,
        results,
        ..SearchPage::default()
    })
    .boxed()
}

pub(crate) fn patched(item: CatalogItem) -> BoxFuture<'static, Result<CatalogItem>> {
    future::ok(item).boxed()
}

pub(crate) fn option(value: &str, label: &str, to_buy: bool) -> SelectOption {
    SelectOption {
        label: label.to_string(),
        value: value.to_string(),
        to_buy,
    }
}

/// Every action emitted on `data`, oldest first.
pub(crate) fn record_data(data: &Signal<OptionsAction>) -> Arc<Mutex<Vec<OptionsAction>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    data.apply(catalog_select::listen(move |action: &OptionsAction| {
        sink.lock().unwrap().push(action.clone());
        Ok(())
    }));
    log
}
