//! Narrative timeline: scripted event queue and staging.

pub mod event;
pub mod queue;
pub mod staging;

pub use event::{
    Advance, AudioEvent, DelayEvent, ErrorPolicy, GameEndEvent, TextEvent, TimelineEvent,
    TIME_HANDICAP,
};
pub use queue::TimelineQueue;
pub use staging::{StagingEvent, StagingStep};
