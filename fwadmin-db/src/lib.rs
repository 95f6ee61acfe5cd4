pub mod pool;
pub mod db;
pub mod sql;
pub mod repository;
pub mod toggle;

pub use pool::{
    DatabasePool,
    PoolStatus,
    connect_with_retry,
};

pub use db::{
    initialize_db,
};

pub use repository::{
    RuleRepository,
    RuleRow,
    UpdatedRule,
    ModeRules,
};

pub use toggle::{
    ToggleOutcome,
    toggle_status,
};
