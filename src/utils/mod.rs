pub mod code_filter;
pub mod db_utils;
pub mod employee_cache;
