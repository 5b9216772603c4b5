pub mod policy;

pub use policy::{NaivePolicy, PolicyKind, ScriptedPolicy, naive_players};
