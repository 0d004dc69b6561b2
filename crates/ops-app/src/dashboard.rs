//! Main dashboard layout component

use crate::sample::FacilitySnapshot;
use leptos::prelude::*;
use ops_charts::{
    AreaChart, AreaChartConfig, GaugeChart, GaugeConfig, HeatmapChart, RadarChart, TrendLineChart,
};
use ops_export::{
    ReportConfig, ReportSection, download, generate_document, priority_class, status_class,
};

#[derive(Debug, Clone, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

/// Report config and tables for a snapshot
pub fn build_report(snapshot: &FacilitySnapshot, generated_on: &str) -> (ReportConfig, Vec<ReportSection>) {
    let config = ReportConfig::new(format!("{} Operations Report", snapshot.site))
        .with_subtitle("Work orders, compliance and ticket volume")
        .with_metadata("Site", snapshot.site.clone())
        .with_metadata("Generated", generated_on)
        .with_metadata(
            "Headcount",
            format!("{:.0} / {:.0}", snapshot.headcount.value, snapshot.headcount.capacity),
        );

    let work_orders = snapshot
        .work_orders
        .iter()
        .fold(
            ReportSection::new("Work Orders", ["ID", "Task", "Area", "Status", "Priority"]),
            |section, wo| {
                section.with_row([
                    wo.id.as_str(),
                    wo.task.as_str(),
                    wo.area.as_str(),
                    wo.status.as_str(),
                    wo.priority.as_str(),
                ])
            },
        )
        .with_cell_class(3, status_class)
        .with_cell_class(4, priority_class);

    let compliance = ReportSection::new("Compliance", ["Area", "Score", "Out of"]).with_rows(
        snapshot
            .compliance
            .iter()
            .map(|c| {
                vec![
                    c.label.clone(),
                    format!("{}", c.value),
                    c.max_value.map_or_else(|| "-".to_string(), |m| format!("{m}")),
                ]
            })
            .collect(),
    );

    let tickets = ReportSection::new("Weekly Tickets", ["Week", "Tickets"]).with_rows(
        snapshot
            .tickets
            .iter()
            .map(|t| vec![t.label.clone(), format!("{}", t.value)])
            .collect(),
    );

    (config, vec![work_orders, compliance, tickets])
}

#[component]
pub fn Dashboard(snapshot: FacilitySnapshot) -> impl IntoView {
    let energy = RwSignal::new(snapshot.energy.clone());
    let days = RwSignal::new(snapshot.days.clone());
    let cells = RwSignal::new(snapshot.occupancy.cells.clone());
    let rows = RwSignal::new(snapshot.occupancy.rows.clone());
    let cols = RwSignal::new(snapshot.occupancy.cols.clone());
    let compliance = RwSignal::new(snapshot.compliance.clone());
    let tickets = RwSignal::new(snapshot.tickets.clone());
    let headcount = RwSignal::new(snapshot.headcount.value);
    let capacity = RwSignal::new(snapshot.headcount.capacity);

    let site = snapshot.site.clone();
    let source = StoredValue::new(snapshot);
    let status = RwSignal::new(ExportStatus::Idle);

    let on_export = move |_| {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let (config, sections) = source.with_value(|s| build_report(s, &today));
        let html = generate_document(&config, &sections);
        match download(&html, &config.filename) {
            Ok(_) => status.set(ExportStatus::Done(config.filename)),
            Err(err) => status.set(ExportStatus::Error(err.to_string())),
        }
    };

    let feedback = move || match status.get() {
        ExportStatus::Idle => None,
        ExportStatus::Done(name) => Some(view! {
            <span class="export-status">{format!("Saved {name}")}</span>
        }
        .into_any()),
        ExportStatus::Error(err) => Some(view! {
            <span class="export-status error">{err}</span>
        }
        .into_any()),
    };

    view! {
        <div class="dashboard">
            <header class="dash-header">
                <h1>{format!("{site} · Facility Operations")}</h1>
                <div>
                    <button class="export-btn" on:click=on_export>"Export report"</button>
                    {feedback}
                </div>
            </header>

            <main class="dash-grid">
                <AreaChart
                    series=energy
                    labels=days
                    title="Energy by System (kWh)"
                    config=AreaChartConfig::stacked()
                />
                <GaugeChart
                    value=headcount
                    max=capacity
                    title="Building Occupancy"
                    config=GaugeConfig::default().with_thresholds(75.0, 90.0)
                />
                <HeatmapChart
                    cells=cells
                    row_labels=rows
                    col_labels=cols
                    title="Occupancy by Area (%)"
                />
                <RadarChart data=compliance title="Compliance Scores" />
                <TrendLineChart data=tickets title="Weekly Maintenance Tickets" />
            </main>
        </div>
    }
}
