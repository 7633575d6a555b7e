pub mod dashas;
pub mod timeline;
pub mod view_state;

pub use dashas::{parse_period_instant, CurrentDashaResponse, DashaLevel, DashaNode, DashaResponse, Lord};
pub use timeline::{annotate, display_date, AnnotatedPeriod, DashaTimeline};
pub use view_state::{visible_rows, DashaAction, DashaViewState, TimelineRow, Transition, ViewEffect};
