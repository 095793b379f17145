//! Task composition
//!
//! The builder contract, the task-graph node model, the concrete builder
//! variants and the per-type factories that assemble them into ordered
//! plans.

pub mod builder;
pub mod builders;
pub mod factory;
pub mod node;

pub use builder::{Task, TaskBuilder, aggregate_watch_paths, dedup_watch_paths};
pub use factory::{
    ApiTaskFactory, AwsMicroserviceTaskFactory, CliTaskFactory, ContainerTaskFactory,
    LibTaskFactory, TaskFactory, UiTaskFactory, create_tasks, factory_for,
};
pub use node::{StdioMode, TaskNode};
