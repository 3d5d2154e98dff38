//! Core library for catalog
//!
//! This crate implements the **Functional Core** of the catalog application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The catalog project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`catalog_core`** (this crate): Product model, listing transforms and session state with zero I/O
//! - **`catalog`**: Fetching the product list, terminal rendering and the CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: filter, sort and paginate return new values and never touch their input
//! - **No side effects**: no I/O; the session only changes when an intent is applied
//! - **Testable**: everything here is tested with fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`product`]: Product records as delivered by the catalog API and their display rows
//! - [`filter`]: Case-insensitive title search
//! - [`sort`]: Stable ordering by title or price, and the sort toggling rule
//! - [`pagination`]: Fixed-size page windows and navigation metadata
//! - [`intent`]: User intents and the text commands that produce them
//! - [`session`]: Session state, the rendered view and the controller that ties them together
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use catalog_core::intent::PageDelta;
//! use catalog_core::pagination::PageSize;
//! use catalog_core::session::Session;
//!
//! let mut session = Session::new(products, PageSize::default());
//!
//! session.on_search("shirt");
//! session.on_page_change(PageDelta::Next);
//!
//! let view = session.view();
//! println!("{}", view.pagination); // "Page 2 of 3"
//! ```

pub mod filter;
pub mod intent;
pub mod pagination;
pub mod product;
pub mod session;
pub mod sort;
