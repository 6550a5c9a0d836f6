pub mod set_language;
