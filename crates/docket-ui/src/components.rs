mod filter_bar;
mod preferences_bar;
mod task_list;
mod task_row;
mod theme_modal;

pub use filter_bar::FilterBar;
pub use preferences_bar::PreferencesBar;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use theme_modal::{
  ChannelField,
  ThemeModal
};
