//! # mevzuat-sync
//!
//! A legislation ingestion pipeline and HTTP API wrapper for mevzuat.gov.tr.
//!
//! mevzuat-sync pulls recently published Turkish legislation from the
//! mevzuat.gov.tr JSON API, classifies each document into one of eleven fixed
//! legal categories by keyword matching on its title, normalizes the
//! heterogeneous upstream records into one canonical shape, and stores
//! documents plus their articles in SQLite, deduplicated by document number.
//! A small HTTP API re-exposes the remote search/detail/article operations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────────────┐   ┌──────────┐
//! │  Remote API  │──▶│  Pipeline                  │──▶│  SQLite  │
//! │ mevzuat.gov  │   │ dedupe+classify+normalize  │   │ sqlx/WAL │
//! └──────────────┘   └────────────────────────────┘   └────┬─────┘
//!                                                          │
//!                                      ┌───────────────────┤
//!                                      ▼                   ▼
//!                                 ┌──────────┐       ┌──────────┐
//!                                 │   CLI    │       │   HTTP   │
//!                                 │  (mvz)   │       │  (axum)  │
//!                                 └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mvz init                      # create database, seed categories
//! mvz sync --days 7             # ingest the last week of legislation
//! mvz get 7504                  # show a stored document
//! mvz categories                # per-category document counts
//! mvz serve api                 # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Canonical records, outcomes, batch summary |
//! | [`classify`] | Ordered keyword-rule category classifier |
//! | [`keywords`] | Title keyword extraction |
//! | [`normalize`] | Field-mapping-table record normalization |
//! | [`client`] | Remote legislation API client |
//! | [`ingest`] | Sync pipeline orchestration |
//! | [`store`] | Deduplication lookup and persistence writer |
//! | [`get`] | Stored-document retrieval |
//! | [`categories`] | Category listing with counts |
//! | [`server`] | HTTP API server |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations and category seeding |

pub mod categories;
pub mod classify;
pub mod client;
pub mod config;
pub mod db;
pub mod get;
pub mod ingest;
pub mod keywords;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod server;
pub mod store;
