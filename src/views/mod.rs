pub mod result_list;

pub use result_list::render_result_list;
