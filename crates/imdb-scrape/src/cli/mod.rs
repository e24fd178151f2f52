// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the imdb-scrape binary.

pub mod batch_cmd;
pub mod legacy_cmd;
pub mod movie_cmd;
pub mod output;
