/// egui views. The models (`TableView`, `ChartModel`) are plain data built by
/// `AppState`; the functions here only draw them and report control changes.
pub mod chart;
pub mod panels;
pub mod table;
