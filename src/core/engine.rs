use crate::core::pipeline::build_report;
use crate::core::Pipeline;
use crate::domain::model::AnalysisReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a `Pipeline` through extract, transform and load for one company.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Extracts and analyzes without writing anything.
    pub async fn analyze(&self, company: &str) -> Result<AnalysisReport> {
        tracing::info!("Searching news for '{}'", company);
        self.monitor.log_stats("Start");

        let items = self.pipeline.extract(company).await?;
        tracing::info!("Found {} articles", items.len());
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(items).await?;
        tracing::info!(
            "Analyzed {} articles ({} skipped)",
            result.articles.len(),
            result.skipped.len()
        );
        self.monitor.log_stats("Transform");

        build_report(company.trim(), result)
    }

    /// Full run; returns where the report bundle was written.
    pub async fn run(&self, company: &str) -> Result<String> {
        let report = self.analyze(company).await?;

        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
