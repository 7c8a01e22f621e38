// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod backend;
pub mod dispatch;
pub mod forms;
pub mod ids;
pub mod model;
pub mod notice;
pub mod query;
pub mod state;
pub mod table;

pub use backend::*;
pub use dispatch::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use notice::*;
pub use query::*;
pub use state::*;
pub use table::*;
