pub mod charts_model;
pub mod charts_service;

pub use charts_model::{
    CategoriesChartFilters, ChartSeries, DepositsChartFilters, SeriesChart, TransfersChart,
    TransfersChartFilters,
};
pub use charts_service::{ChartsService, ChartsServiceTrait};
