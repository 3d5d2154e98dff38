//! Session state and the controller that drives it
//!
//! A [`Session`] owns everything a listing needs between user actions: the
//! loaded catalog, the filtered subset, the keyword, the page and the sort
//! selection. Intents mutate it; [`Session::view`] runs Sort then Paginate
//! over the latest filtered set and produces what the view shows.
//!
//! [`SessionController`] pairs a session with a [`ViewSink`] and renders
//! after every change, which is what interactive front ends use.

use serde::Serialize;

use crate::filter::filter_products;
use crate::intent::{Intent, PageDelta};
use crate::pagination::{paginate, total_pages, PageInfo, PageSize};
use crate::product::{Product, ProductRow};
use crate::sort::{sort_products, SortField, SortState};

/// Rows for the current page, or an explicit marker when nothing matches
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum PageContent {
    Rows(Vec<ProductRow>),
    NoResults,
}

impl PageContent {
    pub fn rows(&self) -> &[ProductRow] {
        match self {
            PageContent::Rows(rows) => rows,
            PageContent::NoResults => &[],
        }
    }
}

/// Everything the view needs to draw one page
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ListingView {
    pub keyword: String,
    pub sort: SortState,
    pub content: PageContent,
    pub pagination: PageInfo,
}

/// Receiver of rendered pages
pub trait ViewSink {
    fn render(&mut self, view: &ListingView);
}

impl<F> ViewSink for F
where
    F: FnMut(&ListingView),
{
    fn render(&mut self, view: &ListingView) {
        (*self)(view)
    }
}

/// Parameters for building a session in one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub keyword: String,
    pub sort_field: Option<SortField>,
    pub descending: bool,
    pub page: usize,
    pub page_size: PageSize,
}

#[derive(Debug, Clone)]
pub struct Session {
    all_products: Vec<Product>,
    filtered_products: Vec<Product>,
    keyword: String,
    current_page: usize,
    page_size: PageSize,
    sort: SortState,
}

impl Session {
    pub fn new(products: Vec<Product>, page_size: PageSize) -> Self {
        let mut session = Session {
            all_products: products,
            filtered_products: Vec::new(),
            keyword: String::new(),
            current_page: 1,
            page_size,
            sort: SortState::default(),
        };
        session.on_search("");
        session
    }

    /// Build a session by replaying the intents equivalent to `query`
    ///
    /// The requested page is clamped into the valid range for the resulting
    /// listing.
    pub fn from_query(products: Vec<Product>, query: &ListingQuery) -> Self {
        let mut session = Session::new(products, query.page_size);
        session.on_search(&query.keyword);

        if let Some(field) = query.sort_field {
            session.on_sort_toggle(field);
            if query.descending {
                session.on_sort_toggle(field);
            }
        }

        session.go_to_page(query.page);
        session
    }

    /// Replace the catalog and show it unfiltered from the first page
    pub fn load(&mut self, products: Vec<Product>) {
        self.all_products = products;
        self.on_search("");
    }

    pub fn on_search(&mut self, keyword: &str) {
        self.keyword = keyword.to_string();
        self.filtered_products = filter_products(&self.all_products, keyword);
        self.current_page = 1;
    }

    /// Move one page back or forward; a no-op at either end
    pub fn on_page_change(&mut self, delta: PageDelta) {
        let total = self.total_pages();

        match delta {
            PageDelta::Previous if self.current_page > 1 => self.current_page -= 1,
            PageDelta::Next if self.current_page < total => self.current_page += 1,
            _ => {}
        }
    }

    pub fn on_page_size_change(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Toggle the sort column; the current page is kept
    pub fn on_sort_toggle(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    /// Jump straight to `page`, clamped to `[1, total_pages]`
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn apply(&mut self, intent: &Intent) {
        match intent {
            Intent::Search(keyword) => self.on_search(keyword),
            Intent::PageChange(delta) => self.on_page_change(*delta),
            Intent::PageSizeChange(size) => self.on_page_size_change(*size),
            Intent::SortToggle(field) => self.on_sort_toggle(*field),
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_products.len(), self.page_size.get())
    }

    /// Sort the filtered products, cut out the current page and describe it
    pub fn view(&self) -> ListingView {
        let ordered = sort_products(
            &self.filtered_products,
            self.sort.field,
            self.sort.direction,
        );
        let (items, pagination) = paginate(&ordered, self.current_page, self.page_size.get());

        let content = if items.is_empty() {
            PageContent::NoResults
        } else {
            PageContent::Rows(items.iter().map(ProductRow::from).collect())
        };

        ListingView {
            keyword: self.keyword.clone(),
            sort: self.sort,
            content,
            pagination,
        }
    }

    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered_products
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }
}

/// Applies intents to a [`Session`] and renders the result after each one
pub struct SessionController<S> {
    session: Session,
    sink: S,
}

impl<S: ViewSink> SessionController<S> {
    pub fn new(session: Session, sink: S) -> Self {
        SessionController { session, sink }
    }

    pub fn render(&mut self) {
        let view = self.session.view();
        self.sink.render(&view);
    }

    pub fn load(&mut self, products: Vec<Product>) {
        self.session.load(products);
        self.render();
    }

    pub fn dispatch(&mut self, intent: &Intent) {
        self.session.apply(intent);
        self.render();
    }

    pub fn on_search(&mut self, keyword: &str) {
        self.dispatch(&Intent::Search(keyword.to_string()));
    }

    pub fn on_page_change(&mut self, delta: PageDelta) {
        self.dispatch(&Intent::PageChange(delta));
    }

    pub fn on_page_size_change(&mut self, page_size: PageSize) {
        self.dispatch(&Intent::PageSizeChange(page_size));
    }

    pub fn on_sort_toggle(&mut self, field: SortField) {
        self.dispatch(&Intent::SortToggle(field));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;
    use crate::sort::SortDirection;

    fn create_test_product(id: i64, title: &str, price: f64) -> Product {
        Product {
            id: ProductId::Int(id),
            title: title.to_string(),
            price,
            category: None,
            images: vec![],
        }
    }

    fn twelve_products() -> Vec<Product> {
        (1..=12)
            .map(|i| create_test_product(i, &format!("Product {i}"), i as f64))
            .collect()
    }

    fn size(n: usize) -> PageSize {
        PageSize::try_from(n).unwrap()
    }

    fn row_ids(view: &ListingView) -> Vec<String> {
        view.content
            .rows()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }

    #[derive(Default)]
    struct RecordingSink {
        views: Vec<ListingView>,
    }

    impl ViewSink for RecordingSink {
        fn render(&mut self, view: &ListingView) {
            self.views.push(view.clone());
        }
    }

    #[test]
    fn test_paging_through_twelve_products() {
        let mut controller =
            SessionController::new(Session::new(vec![], size(5)), RecordingSink::default());
        controller.load(twelve_products());
        controller.on_search("");

        let view = controller.sink().views.last().unwrap().clone();
        assert_eq!(row_ids(&view), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(view.pagination.to_string(), "Page 1 of 3");
        assert!(!view.pagination.has_previous);
        assert!(view.pagination.has_next);

        controller.on_page_change(PageDelta::Next);
        controller.on_page_change(PageDelta::Next);

        let view = controller.sink().views.last().unwrap();
        assert_eq!(row_ids(view), vec!["11", "12"]);
        assert_eq!(view.pagination.current_page, 3);
        assert!(view.pagination.has_previous);
        assert!(!view.pagination.has_next);
        assert_eq!(controller.sink().views.len(), 4);
    }

    #[test]
    fn test_page_change_is_clamped() {
        let mut session = Session::new(twelve_products(), size(5));

        session.on_page_change(PageDelta::Previous);
        assert_eq!(session.current_page(), 1);

        for _ in 0..10 {
            session.on_page_change(PageDelta::Next);
        }
        assert_eq!(session.current_page(), 3);
    }

    #[test]
    fn test_sort_toggle_by_price() {
        let products = vec![
            create_test_product(1, "Zed", 10.0),
            create_test_product(2, "Ant", 5.0),
        ];
        let mut session = Session::new(products, size(5));

        session.on_sort_toggle(SortField::Price);
        let titles: Vec<String> = session
            .view()
            .content
            .rows()
            .iter()
            .map(|r| r.title.clone())
            .collect();
        assert_eq!(titles, vec!["Ant", "Zed"]);

        session.on_sort_toggle(SortField::Price);
        let titles: Vec<String> = session
            .view()
            .content
            .rows()
            .iter()
            .map(|r| r.title.clone())
            .collect();
        assert_eq!(titles, vec!["Zed", "Ant"]);
        assert_eq!(session.sort().direction, SortDirection::Desc);
    }

    #[test]
    fn test_search_without_match_shows_no_results() {
        let mut session = Session::new(twelve_products(), size(5));

        session.on_search("xyz-no-match");
        let view = session.view();

        assert_eq!(view.content, PageContent::NoResults);
        assert_eq!(view.pagination.total_pages, 1);
        assert!(!view.pagination.has_previous);
        assert!(!view.pagination.has_next);
    }

    #[test]
    fn test_search_resets_page() {
        let mut session = Session::new(twelve_products(), size(5));
        session.on_page_change(PageDelta::Next);
        assert_eq!(session.current_page(), 2);

        session.on_search("product 1");

        assert_eq!(session.current_page(), 1);
        // "Product 1", "Product 10", "Product 11", "Product 12"
        assert_eq!(session.filtered_products().len(), 4);
        assert_eq!(session.keyword(), "product 1");
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut session = Session::new(twelve_products(), size(5));
        session.on_page_change(PageDelta::Next);

        session.on_page_size_change(size(10));

        assert_eq!(session.current_page(), 1);
        assert_eq!(session.total_pages(), 2);
        assert_eq!(session.view().content.rows().len(), 10);
    }

    #[test]
    fn test_sort_toggle_keeps_page() {
        let mut session = Session::new(twelve_products(), size(5));
        session.on_page_change(PageDelta::Next);

        session.on_sort_toggle(SortField::Price);
        session.on_sort_toggle(SortField::Price);

        assert_eq!(session.current_page(), 2);
        // Descending by price, second page: 7..3
        assert_eq!(row_ids(&session.view()), vec!["7", "6", "5", "4", "3"]);
    }

    #[test]
    fn test_sort_does_not_reorder_filtered_products() {
        let mut session = Session::new(twelve_products(), size(5));

        session.on_sort_toggle(SortField::Price);
        session.on_sort_toggle(SortField::Price);
        let _ = session.view();

        let ids: Vec<String> = session
            .filtered_products()
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_sort_applies_to_latest_filter() {
        let products = vec![
            create_test_product(1, "Red Shirt", 30.0),
            create_test_product(2, "Blue Shirt", 10.0),
            create_test_product(3, "Red Hat", 20.0),
            create_test_product(4, "Red Scarf", 5.0),
        ];
        let mut session = Session::new(products, size(5));

        session.on_sort_toggle(SortField::Price);
        session.on_search("red");

        assert_eq!(row_ids(&session.view()), vec!["4", "3", "1"]);
        assert_eq!(session.all_products().len(), 4);
    }

    #[test]
    fn test_apply_routes_intents() {
        let mut session = Session::new(twelve_products(), size(5));

        session.apply(&Intent::PageSizeChange(size(10)));
        session.apply(&Intent::PageChange(PageDelta::Next));
        session.apply(&Intent::SortToggle(SortField::Title));

        assert_eq!(session.page_size().get(), 10);
        assert_eq!(session.current_page(), 2);
        assert_eq!(session.sort().field, Some(SortField::Title));

        session.apply(&Intent::Search("Product 2".to_string()));
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.filtered_products().len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let mut session = Session::new(vec![], PageSize::default());

        session.on_page_change(PageDelta::Next);
        let view = session.view();

        assert_eq!(session.current_page(), 1);
        assert_eq!(view.content, PageContent::NoResults);
        assert_eq!(view.pagination.to_string(), "Page 1 of 1");
        assert!(!view.pagination.has_next);
    }

    #[test]
    fn test_load_replaces_catalog_and_clears_search() {
        let mut session = Session::new(twelve_products(), size(5));
        session.on_search("Product 1");
        session.on_page_change(PageDelta::Next);

        session.load(vec![create_test_product(99, "Fresh", 1.0)]);

        assert_eq!(session.keyword(), "");
        assert_eq!(session.current_page(), 1);
        assert_eq!(row_ids(&session.view()), vec!["99"]);
    }

    #[test]
    fn test_from_query() {
        let query = ListingQuery {
            keyword: "product".to_string(),
            sort_field: Some(SortField::Price),
            descending: true,
            page: 2,
            page_size: size(5),
        };

        let session = Session::from_query(twelve_products(), &query);

        assert_eq!(session.current_page(), 2);
        assert_eq!(session.sort().direction, SortDirection::Desc);
        assert_eq!(row_ids(&session.view()), vec!["7", "6", "5", "4", "3"]);
    }

    #[test]
    fn test_from_query_clamps_page() {
        let query = ListingQuery {
            page: 50,
            page_size: size(5),
            ..Default::default()
        };

        let session = Session::from_query(twelve_products(), &query);
        assert_eq!(session.current_page(), 3);

        let query = ListingQuery {
            page: 0,
            ..Default::default()
        };
        let session = Session::from_query(twelve_products(), &query);
        assert_eq!(session.current_page(), 1);
    }

    #[test]
    fn test_closure_sink() {
        let mut pages = Vec::new();
        {
            let mut controller = SessionController::new(
                Session::new(twelve_products(), size(5)),
                |view: &ListingView| pages.push(view.pagination.current_page),
            );
            controller.render();
            controller.on_page_change(PageDelta::Next);
            controller.on_page_change(PageDelta::Previous);
        }

        assert_eq!(pages, vec![1, 2, 1]);
    }

    #[test]
    fn test_view_json_shape() {
        let mut session = Session::new(twelve_products(), size(5));
        session.on_search("nothing here");

        let json = serde_json::to_value(session.view()).unwrap();

        assert_eq!(json["content"]["kind"], "no_results");
        assert_eq!(json["pagination"]["total_pages"], 1);
        assert_eq!(json["sort"]["direction"], "asc");
        assert_eq!(json["keyword"], "nothing here");
    }
}
