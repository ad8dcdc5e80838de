mod observers;

pub use observers::{SliderContext, SliderEvent, SliderObserver};
