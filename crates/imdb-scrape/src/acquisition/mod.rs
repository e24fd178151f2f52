// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Page acquisition: turning a title URL into raw HTML bytes.

pub mod http_client;
