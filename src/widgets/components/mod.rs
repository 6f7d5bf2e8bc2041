pub mod color_session;
