// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the Overstory workspace. See `benches/`.
