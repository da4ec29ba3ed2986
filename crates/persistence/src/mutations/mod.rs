// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! All functions take an explicit connection; the engine composes them with
//! queries inside one immediate transaction per operation. None of these
//! functions appends ledger rows on its own; the engine pairs every cache
//! update with its ledger append explicitly.

pub mod assignments;
pub mod employers;
pub mod history;
pub mod profiles;
pub mod projects;
pub mod training;
