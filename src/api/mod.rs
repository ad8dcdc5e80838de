mod mount;
mod notifier;
mod observer_registry;
mod render_frame_builder;
mod slider;
mod slider_config;
mod snapshot;

pub use mount::MountGuard;
pub use notifier::{ChangeNotifier, HourChange};
pub use render_frame_builder::{SliderRenderStyle, build_slider_frame};
pub use slider::RangeSlider;
pub use slider_config::RangeSliderConfig;
pub use snapshot::{SLIDER_SNAPSHOT_JSON_SCHEMA_V1, SliderSnapshot, SliderSnapshotJsonContractV1};
