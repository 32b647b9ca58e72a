pub mod result_list_viewmodel;

pub use result_list_viewmodel::{ResultListView, ResultListViewModel, StopCard};
