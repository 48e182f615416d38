//! Demo data
//!
//! Dates are laid out relative to `today` so follow-up and overdue views
//! always have something to show.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use crm_models::{
    Activity, ActivityType, CampaignStatus, Candidate, Invoice, InvoiceStatus, Lead, LeadPriority,
    LeadStatus, MarketingCampaign, Notification, NotificationKind, Project, ProjectStatus,
    QuotationModule, Role, Task, TaskPriority, User,
};

use crate::snapshot::Snapshot;

/// Catalog used when storage holds nothing usable
pub fn default_catalog() -> Vec<QuotationModule> {
    vec![
        QuotationModule::new(
            "mod-web",
            "Website Development",
            "Responsive marketing site with CMS",
            45000,
        ),
        QuotationModule::new(
            "mod-app",
            "Mobile App",
            "Cross-platform app for iOS and Android",
            120000,
        ),
        QuotationModule::new(
            "mod-seo",
            "SEO Package",
            "Technical audit and three months of on-page work",
            15000,
        ),
        QuotationModule::new(
            "mod-social",
            "Social Media Management",
            "Content calendar and posting on two channels",
            20000,
        ),
        QuotationModule::new(
            "mod-crm",
            "CRM Integration",
            "Lead capture wired into the client's CRM",
            30000,
        ),
    ]
}

pub fn seed_users() -> Vec<User> {
    vec![
        User::new("u-ceo", "Rahul Mehta", "rahul@agency.io", "9000000000", Role::Ceo),
        User::new("u-founder", "Kavya Iyer", "kavya@agency.io", "9000000010", Role::Founder),
        User::new("u-cto", "Arvind Rao", "arvind@agency.io", "9000000011", Role::Cto),
        User::new("u-sneha", "Sneha Verma", "sneha@agency.io", "9000000001", Role::Bda)
            .with_commission_rate(10.0),
        User::new("u-rohan", "Rohan Das", "rohan@agency.io", "9000000002", Role::Bda)
            .with_commission_rate(8.0),
        User::new(
            "u-meera",
            "Meera Kapoor",
            "meera@agency.io",
            "9000000003",
            Role::MarketingManager,
        ),
        User::new(
            "u-farhan",
            "Farhan Ali",
            "farhan@agency.io",
            "9000000004",
            Role::FinanceManager,
        ),
        User::new("u-nisha", "Nisha Pillai", "nisha@agency.io", "9000000005", Role::HrManager),
        User::new("u-admin", "Asha Menon", "admin@agency.io", "9000000006", Role::Admin),
        User::new(
            "u-vikram",
            "Vikram Singh",
            "vikram@agency.io",
            "9000000007",
            Role::ProjectManager,
        ),
        User::new("u-dev", "Karan Joshi", "karan@agency.io", "9000000008", Role::Developer),
        User::new("u-client", "Priya Nair", "priya@nairtextiles.in", "9000000009", Role::Client),
    ]
}

pub fn seed_candidates() -> Vec<Candidate> {
    vec![Candidate::new(
        "cand-mock-1",
        "Aditya Kulkarni",
        "aditya.k@mail.com",
        "9000000100",
    )
    .applied_at(Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).single().unwrap_or_else(Utc::now))]
}

pub fn seed_leads(today: NaiveDate) -> Vec<Lead> {
    let days = Duration::days;
    vec![
        Lead::new(
            "lead-1",
            "Priya Nair",
            "Nair Textiles",
            "priya@nairtextiles.in",
            today - days(3),
        )
        .with_phone("9811111111")
        .with_value(450000)
        .with_status(LeadStatus::ProposalSent)
        .with_priority(LeadPriority::Hot)
        .assigned_to("Sneha")
        .follow_up_on(today)
        .with_score(82)
        .with_source("Referral"),
        Lead::new(
            "lead-2",
            "Imran Sheikh",
            "Sheikh Logistics",
            "imran@sheikhlogistics.com",
            today - days(10),
        )
        .with_value(1000000)
        .with_status(LeadStatus::ClosedWon)
        .with_priority(LeadPriority::Hot)
        .assigned_to("Sneha")
        .follow_up_on(today - days(2))
        .with_score(95)
        .with_source("LinkedIn"),
        Lead::new(
            "lead-3",
            "Ananya Bose",
            "Bose Bakers",
            "ananya@bosebakers.in",
            today - days(6),
        )
        .with_value(120000)
        .with_status(LeadStatus::Contacted)
        .with_priority(LeadPriority::Warm)
        .assigned_to("Rohan Das")
        .follow_up_on(today - days(1))
        .with_score(55)
        .with_source("Cold Call"),
        Lead::new(
            "lead-4",
            "George Mathew",
            "Mathew Realty",
            "george@mathewrealty.com",
            today - days(1),
        )
        .with_value(300000)
        .with_status(LeadStatus::MeetingScheduled)
        .with_priority(LeadPriority::Warm)
        .assigned_to("Rohan Das")
        .follow_up_on(today + days(1))
        .with_score(68)
        .with_source("Website"),
        Lead::new(
            "lead-5",
            "Sunita Reddy",
            "Reddy Clinics",
            "sunita@reddyclinics.in",
            today - days(20),
        )
        .with_value(80000)
        .with_status(LeadStatus::ClosedLost)
        .with_priority(LeadPriority::Cold)
        .assigned_to("Sneha Verma")
        .follow_up_on(today - days(5))
        .with_score(20)
        .with_source("Instagram"),
        Lead::new(
            "lead-6",
            "Dev Malhotra",
            "Malhotra Motors",
            "dev@malhotramotors.com",
            today,
        )
        .with_value(60000)
        .with_priority(LeadPriority::Cold)
        .assigned_to("Sneha")
        .with_score(35),
    ]
    .into_iter()
    .map(|lead| with_history(lead, today))
    .collect()
}

fn with_history(mut lead: Lead, today: NaiveDate) -> Lead {
    let first = lead.last_contact;
    lead.activities.push(Activity::new(
        ActivityType::ColdCall,
        first,
        format!("Intro call with {}", lead.name),
    ));
    if lead.status == LeadStatus::ProposalSent {
        lead.selected_modules = vec!["mod-web".into(), "mod-seo".into()];
        lead.activities.push(Activity::new(
            ActivityType::Quotation,
            first,
            "Shared quotation for website and SEO",
        ));
        lead.add_task(
            Task::new("task-lead-1", "Confirm proposal feedback", "Sneha Verma", today)
                .with_priority(TaskPriority::High)
                .with_client(lead.company.clone()),
        );
    }
    lead
}

pub fn seed_projects(today: NaiveDate) -> Vec<Project> {
    let days = Duration::days;
    vec![
        Project::new(
            "proj-1",
            "Storefront Revamp",
            "Nair Textiles",
            today + days(21),
            250000,
        )
        .with_status(ProjectStatus::InProgress)
        .with_progress(45)
        .with_tasks(vec![
            Task::new("task-p1-1", "Finalize product grid", "Karan Joshi", today + days(2))
                .with_priority(TaskPriority::High)
                .with_client("Nair Textiles"),
            Task::new("task-p1-2", "Payment gateway sandbox", "Karan Joshi", today - days(1))
                .with_client("Nair Textiles"),
        ]),
        Project::new(
            "proj-2",
            "Fleet Tracker App",
            "Sheikh Logistics",
            today + days(60),
            800000,
        )
        .with_status(ProjectStatus::Planning)
        .with_tasks(vec![Task::new(
            "task-p2-1",
            "Requirements workshop",
            "Vikram Singh",
            today + days(5),
        )
        .with_client("Sheikh Logistics")]),
        Project::new(
            "proj-3",
            "Clinic Booking Portal",
            "Reddy Clinics",
            today - days(4),
            150000,
        )
        .with_status(ProjectStatus::Review)
        .with_progress(90),
        Project::new(
            "proj-4",
            "Brand Refresh",
            "Bose Bakers",
            today - days(30),
            60000,
        )
        .with_status(ProjectStatus::Completed)
        .with_progress(100),
    ]
}

pub fn seed_invoices(today: NaiveDate) -> Vec<Invoice> {
    let days = Duration::days;
    vec![
        Invoice::new("inv-101", "Nair Textiles", 125000, today - days(40), InvoiceStatus::Paid),
        Invoice::new("inv-102", "Sheikh Logistics", 400000, today - days(12), InvoiceStatus::Pending),
        Invoice::new("inv-103", "Reddy Clinics", 75000, today - days(45), InvoiceStatus::Overdue),
        Invoice::new("inv-104", "Bose Bakers", 60000, today - days(25), InvoiceStatus::Paid),
    ]
}

pub fn seed_notifications(today: NaiveDate) -> Vec<Notification> {
    vec![
        Notification::new(
            "notif-1",
            NotificationKind::Overdue,
            "Follow-up overdue",
            "Ananya Bose (Bose Bakers) was due yesterday",
            today,
        ),
        Notification::new(
            "notif-2",
            NotificationKind::Approaching,
            "Follow-up tomorrow",
            "Meeting prep for Mathew Realty",
            today,
        ),
        Notification::new(
            "notif-3",
            NotificationKind::Other,
            "New application",
            "Aditya Kulkarni applied for a sales role",
            today - Duration::days(1),
        ),
    ]
}

pub fn seed_campaigns(today: NaiveDate) -> Vec<MarketingCampaign> {
    let days = Duration::days;
    vec![
        MarketingCampaign {
            id: "camp-1".into(),
            name: "Monsoon Website Offer".into(),
            channel: "Instagram".into(),
            status: CampaignStatus::Active,
            budget: 50000,
            spent: 32000,
            leads_generated: 40,
            conversions: 6,
            start_date: today - days(20),
            end_date: Some(today + days(10)),
        },
        MarketingCampaign {
            id: "camp-2".into(),
            name: "LinkedIn Founders Outreach".into(),
            channel: "LinkedIn".into(),
            status: CampaignStatus::Paused,
            budget: 30000,
            spent: 12000,
            leads_generated: 8,
            conversions: 1,
            start_date: today - days(45),
            end_date: None,
        },
        MarketingCampaign {
            id: "camp-3".into(),
            name: "Diwali Email Blast".into(),
            channel: "Email".into(),
            status: CampaignStatus::Completed,
            budget: 10000,
            spent: 10000,
            leads_generated: 0,
            conversions: 0,
            start_date: today - days(90),
            end_date: Some(today - days(80)),
        },
    ]
}

/// Full demo snapshot with the default catalog
pub fn seed_snapshot(today: NaiveDate) -> Snapshot {
    Snapshot::builder()
        .users(seed_users())
        .candidates(seed_candidates())
        .leads(seed_leads(today))
        .projects(seed_projects(today))
        .invoices(seed_invoices(today))
        .modules(default_catalog())
        .notifications(seed_notifications(today))
        .campaigns(seed_campaigns(today))
        .build()
}
