use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};

use shiftdesk_client::{ApiClient, JobService, PENDING_PAGE_SIZE};
use shiftdesk_types::{Job, JobListRequest, JobPage, JobStatus};

use crate::commands::describe;

const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

pub async fn list_jobs(
    client: ApiClient,
    status: Option<&str>,
    page: u32,
    size: u32,
    json: bool,
) -> Result<()> {
    let mut request = JobListRequest::new().page(page, size);
    if let Some(status) = status {
        request = request.status(status.parse::<JobStatus>()?);
    }

    let page = JobService::new(client).list(&request).await.map_err(describe)?.into_data();
    print_page(&page, json)
}

pub async fn pending_jobs(client: ApiClient, json: bool) -> Result<()> {
    let page = JobService::new(client)
        .pending(PENDING_PAGE_SIZE)
        .await
        .map_err(describe)?
        .into_data();
    print_page(&page, json)
}

pub async fn show_job(client: ApiClient, id: &str, json: bool) -> Result<()> {
    let job = JobService::new(client).get(id).await.map_err(describe)?.into_data();

    if json {
        println!("{}", serde_json::to_string_pretty(&job)?);
        return Ok(());
    }

    println!("{}", title(&job).cyan().bold());
    println!("  ID: {}", job.id);
    println!("  Tenant: {}", or_dash(&job.tenant_name));
    println!("  Plan: {}", or_dash(&job.plan_name));
    println!("  Address: {}", or_dash(&job.address_title));
    println!("  Start: {}", format_date(&job.work_start_date));
    println!("  End: {}", format_date(&job.work_end_date));
    println!("  Staff: {}", staffing(&job));
    println!("  Applications: {}", job.application_count);
    println!("  Hourly: {}", format_price(job.hourly_price));
    let tags: Vec<String> = job
        .job_tag_infos
        .iter()
        .map(|t| t.tag_names.get("tr").cloned().unwrap_or_else(|| t.tag_id.clone()))
        .collect();
    if !tags.is_empty() {
        println!("  Tags: {}", tags.join(", "));
    }
    println!("  Created: {}", format_date(&job.created_time));
    Ok(())
}

pub async fn approve_job(client: ApiClient, id: &str) -> Result<()> {
    JobService::new(client).approve(id).await.map_err(describe)?;
    println!("{} Job approved: {}", "✓".green(), id.green());
    Ok(())
}

pub async fn set_job_status(client: ApiClient, id: &str, status: &str) -> Result<()> {
    let status: JobStatus = status.parse()?;
    JobService::new(client).update_status(id, status).await.map_err(describe)?;
    println!("{} Job {} set to {}", "✓".green(), id, status.to_string().green());
    Ok(())
}

fn print_page(page: &JobPage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Tenant", "Address", "Start", "Staff", "Hourly"]);

    for job in &page.items {
        let staff_color = if job.approved_application_count >= job.personnel_need_count {
            Color::Green
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(&job.id),
            Cell::new(title(job)),
            Cell::new(or_dash(&job.tenant_name)),
            Cell::new(or_dash(&job.address_title)),
            Cell::new(format_date(&job.work_start_date)),
            Cell::new(staffing(job)).fg(staff_color),
            Cell::new(format_price(job.hourly_price)),
        ]);
    }

    println!("{table}");
    println!(
        "\nPage {} of {} ({} jobs total)",
        page.index + 1,
        page.pages.max(1),
        page.count
    );
    Ok(())
}

fn title(job: &Job) -> &str {
    job.title().unwrap_or("(untitled)")
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn staffing(job: &Job) -> String {
    format!("{}/{}", job.approved_application_count, job.personnel_need_count)
}

fn format_price(price: f64) -> String {
    format!("{:.2} TL", price)
}

/// Backend timestamps come with or without an offset; both render as `dd.mm.yyyy HH:MM`.
fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return "-".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format(DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
