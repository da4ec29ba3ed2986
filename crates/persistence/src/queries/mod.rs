// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All functions take an explicit connection so the engine can compose them
//! with mutations inside a single transaction.

pub mod assignments;
pub mod employers;
pub mod history;
pub mod profiles;
pub mod projects;
pub mod training;
