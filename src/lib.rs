// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Eduverse Server - REST facade over the EduverseX Sui contracts
//!
//! This crate exposes courses, users and NFTs of the EduverseX platform over
//! HTTP. Every write becomes a Move call signed with the service key and
//! executed on a Sui full node; every read is a dev-inspect call whose return
//! values are decoded against a versioned record schema. No domain state is
//! kept locally.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Sui key, transaction building, JSON-RPC client and result decoding
//! - `contracts` - Course, user and NFT facades over the contract entry points
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup

pub mod api;
pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
