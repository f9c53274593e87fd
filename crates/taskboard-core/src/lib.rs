//! taskboard-core
//!
//! Core building blocks for the Taskboard app: a personal Kanban board whose
//! drag-and-drop moves are applied optimistically, persisted through a task
//! store and shared with other surfaces.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, errors, events）
//! - **ports**: 抽象化レイヤー（TaskStore, IdentityProvider, DurableSlot, NoticeSink, Clock, IdGenerator）
//! - **board**: column model（status ごとの 3 バケット）
//! - **drag**: drag gesture の状態機械と drop 先の判定
//! - **reconcile**: optimistic move / rollback と create / edit / delete
//! - **sync**: surface 間の同期（durable slot + broadcast）
//! - **views**: search / dashboard / calendar の射影
//! - **app**: BoardBuilder と route guard
//! - **impls**: 実装（InMemoryTaskStore など開発用）
//! - **config**: BoardConfig（TOML）

pub mod app;
pub mod board;
pub mod config;
pub mod domain;
pub mod drag;
pub mod impls;
pub mod ports;
pub mod reconcile;
pub mod sync;
pub mod views;
