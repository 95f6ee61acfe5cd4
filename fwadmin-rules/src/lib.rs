pub mod mode;
pub mod validate;
pub mod kind;
pub mod schema;

pub use mode::Mode;
pub use kind::{RuleKind, IpRules, UrlRules, PortRules};
pub use schema::{RuleListInput, UpdateListInput, UpdateAllInput, parse_mode};
