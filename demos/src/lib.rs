// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable examples for the Overstory workspace. See `examples/`.
