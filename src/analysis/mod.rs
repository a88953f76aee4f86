pub mod build_order;
pub mod champion_timeline;
pub mod classifier;
pub mod event_timeline;
pub mod kill_recap;
pub mod normalizer;
pub mod skill_order;
pub mod teams;
pub mod validate;
