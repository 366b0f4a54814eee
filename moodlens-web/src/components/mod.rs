pub mod about;
pub mod analysis_history;
pub mod aspect_breakdown;
pub mod batch_processor;
pub mod emotion_spectrum;
pub mod export_buttons;
pub mod insights_panel;
pub mod modal;
pub mod sentiment_result;
pub mod settings;
pub mod sidebar;
pub mod statistics;
pub mod text_input;
pub mod toast;
