//! Example: Building a chart from in-memory employee records
//!
//! This example builds a small directory programmatically, resolves and lays
//! it out, then walks the tree and prints the initial view.

use orgchart::{
    ChartBuilder, config::AppConfig, employee::EmployeeRecord, geometry::Size,
    hierarchy::KeywordClassifier,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = vec![
        EmployeeRecord::new("1", "Hélène", "Martin")
            .with_email("helene@corp.com")
            .with_job_title("Directrice Générale"),
        EmployeeRecord::new("2", "Bruno", "Petit")
            .with_email("bruno@corp.com")
            .with_manager("helene@corp.com")
            .with_job_title("Responsable Technique"),
        EmployeeRecord::new("3", "Amina", "Diallo")
            .with_email("amina@corp.com")
            .with_manager("bruno@corp.com")
            .with_job_title("Développeuse"),
        EmployeeRecord::new("4", "Chloé", "Bernard")
            .with_email("chloe@corp.com")
            .with_manager("helene@corp.com")
            .with_job_title("Comptable"),
        // Manager address that does not exist: lands under the root.
        EmployeeRecord::new("5", "Yanis", "Roux")
            .with_email("yanis@corp.com")
            .with_manager("former.boss@corp.com")
            .with_job_title("Stagiaire"),
    ];

    let chart = ChartBuilder::new(AppConfig::default())
        .with_viewport(Size::new(1280.0, 800.0))
        .with_classifier(KeywordClassifier::new(["directrice", "responsable"]))
        .build(records)?;

    println!("Hierarchy:");
    for (id, node) in chart.hierarchy().iter() {
        let position = chart
            .layout()
            .node(id)
            .map(|positioned| positioned.center())
            .unwrap_or_default();
        println!(
            "{}{} ({}) at ({:.0}, {:.0})",
            "  ".repeat(node.depth()),
            node.record().display_name(),
            node.record().job_title(),
            position.x(),
            position.y()
        );
    }

    for warning in chart.warnings() {
        println!("warning: {warning}");
    }

    let transform = chart.transform();
    println!(
        "\nInitial view: scale {:.2}, translation ({:.1}, {:.1})",
        transform.scale(),
        transform.translation().x(),
        transform.translation().y()
    );

    let svg = chart.render_svg()?;
    println!("SVG document: {} bytes", svg.len());

    Ok(())
}
