pub mod dialog;
pub mod form;
pub mod gauge;
pub mod song_list;
pub mod spinner;
