//! Built-in catalog used when no seed file is configured

use chrono::{DateTime, Utc};

use crate::catalog::{PricingModel, ToolCategory, ToolRecord, ToolStatus};

struct SeedEntry {
    id: &'static str,
    name: &'static str,
    url: &'static str,
    description: &'static str,
    category: ToolCategory,
    tags: &'static [&'static str],
    pricing_model: PricingModel,
    image_seed: &'static str,
    submitted_by: &'static str,
    created_at: &'static str,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "1",
        name: "Gemini",
        url: "https://gemini.google.com",
        description: "A powerful, multimodal AI model from Google.",
        category: ToolCategory::AiAssistant,
        tags: &["api", "free", "paid"],
        pricing_model: PricingModel::Freemium,
        image_seed: "gemini",
        submitted_by: "user1",
        created_at: "2023-10-26T10:00:00Z",
    },
    SeedEntry {
        id: "2",
        name: "Midjourney",
        url: "https://www.midjourney.com",
        description: "An independent research lab exploring new mediums of thought and expanding the imaginative powers of the human species.",
        category: ToolCategory::ImageGeneration,
        tags: &["discord", "paid"],
        pricing_model: PricingModel::Paid,
        image_seed: "midjourney",
        submitted_by: "user1",
        created_at: "2023-10-25T11:30:00Z",
    },
    SeedEntry {
        id: "3",
        name: "HubSpot",
        url: "https://www.hubspot.com",
        description: "A CRM platform with all the software, integrations, and resources you need to connect marketing, sales, content management, and customer service.",
        category: ToolCategory::Crm,
        tags: &["marketing", "sales", "freemium"],
        pricing_model: PricingModel::Freemium,
        image_seed: "hubspot",
        submitted_by: "user2",
        created_at: "2023-10-24T09:00:00Z",
    },
    SeedEntry {
        id: "4",
        name: "Webflow",
        url: "https://webflow.com",
        description: "Build responsive websites in your browser, then host with us or export your code to host wherever.",
        category: ToolCategory::NoCodeLowCode,
        tags: &["no-code", "design", "hosting"],
        pricing_model: PricingModel::Freemium,
        image_seed: "webflow",
        submitted_by: "user2",
        created_at: "2023-10-23T14:00:00Z",
    },
    SeedEntry {
        id: "5",
        name: "Google Analytics",
        url: "https://analytics.google.com",
        description: "A web analytics service that tracks and reports website traffic.",
        category: ToolCategory::Analytics,
        tags: &["free", "data", "tracking"],
        pricing_model: PricingModel::Free,
        image_seed: "analytics",
        submitted_by: "user1",
        created_at: "2023-10-22T16:45:00Z",
    },
    SeedEntry {
        id: "6",
        name: "VS Code",
        url: "https://code.visualstudio.com",
        description: "A free source-code editor made by Microsoft for Windows, Linux and macOS.",
        category: ToolCategory::DevelopmentTools,
        tags: &["open-source", "free", "ide"],
        pricing_model: PricingModel::OpenSource,
        image_seed: "vscode",
        submitted_by: "user3",
        created_at: "2023-10-21T18:00:00Z",
    },
    SeedEntry {
        id: "7",
        name: "Zapier",
        url: "https://zapier.com",
        description: "Easy automation for busy people. Zapier moves info between your web apps automatically.",
        category: ToolCategory::MarketingAutomation,
        tags: &["integration", "workflow"],
        pricing_model: PricingModel::Freemium,
        image_seed: "zapier",
        submitted_by: "user3",
        created_at: "2023-10-20T12:10:00Z",
    },
    SeedEntry {
        id: "8",
        name: "Figma",
        url: "https://www.figma.com",
        description: "The collaborative interface design tool.",
        category: ToolCategory::DevelopmentTools,
        tags: &["design", "ui", "ux", "collaboration"],
        pricing_model: PricingModel::Freemium,
        image_seed: "figma",
        submitted_by: "user1",
        created_at: "2023-10-19T10:00:00Z",
    },
    SeedEntry {
        id: "9",
        name: "Notion",
        url: "https://www.notion.so",
        description: "The all-in-one workspace for your notes, tasks, wikis, and databases.",
        category: ToolCategory::Productivity,
        tags: &["collaboration", "docs", "freemium"],
        pricing_model: PricingModel::Freemium,
        image_seed: "notion",
        submitted_by: "user2",
        created_at: "2023-10-18T15:20:00Z",
    },
    SeedEntry {
        id: "10",
        name: "Runway",
        url: "https://runwayml.com/",
        description: "AI video creation suite. Everything you need to make anything you want.",
        category: ToolCategory::VideoGeneration,
        tags: &["video", "ai", "creative"],
        pricing_model: PricingModel::Freemium,
        image_seed: "runway",
        submitted_by: "user3",
        created_at: "2023-11-01T10:00:00Z",
    },
    SeedEntry {
        id: "11",
        name: "Bubble",
        url: "https://bubble.io",
        description: "The best way to build web apps without code.",
        category: ToolCategory::NoCodeLowCode,
        tags: &["no-code", "app builder"],
        pricing_model: PricingModel::Paid,
        image_seed: "bubble",
        submitted_by: "user1",
        created_at: "2023-11-02T11:00:00Z",
    },
    SeedEntry {
        id: "12",
        name: "Sentry",
        url: "https://sentry.io",
        description: "Application monitoring and error tracking software.",
        category: ToolCategory::DevelopmentTools,
        tags: &["monitoring", "debugging", "open-source"],
        pricing_model: PricingModel::Freemium,
        image_seed: "sentry",
        submitted_by: "user2",
        created_at: "2023-11-03T12:00:00Z",
    },
    SeedEntry {
        id: "13",
        name: "Loom",
        url: "https://www.loom.com",
        description: "Video messaging for work.",
        category: ToolCategory::Productivity,
        tags: &["video", "collaboration"],
        pricing_model: PricingModel::Freemium,
        image_seed: "loom",
        submitted_by: "user3",
        created_at: "2023-11-04T13:00:00Z",
    },
    SeedEntry {
        id: "14",
        name: "Jasper",
        url: "https://www.jasper.ai/",
        description: "The AI Content Platform that helps you and your team break through creative blocks to create amazing, original content 10X faster.",
        category: ToolCategory::AiAssistant,
        tags: &["writing", "content", "paid"],
        pricing_model: PricingModel::Paid,
        image_seed: "jasper",
        submitted_by: "user1",
        created_at: "2023-11-05T14:00:00Z",
    },
    SeedEntry {
        id: "15",
        name: "Tableau",
        url: "https://www.tableau.com/",
        description: "Leading data visualization software.",
        category: ToolCategory::Analytics,
        tags: &["data visualization", "business intelligence"],
        pricing_model: PricingModel::Paid,
        image_seed: "tableau",
        submitted_by: "user2",
        created_at: "2023-11-06T15:00:00Z",
    },
];

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The built-in seed catalog, all records approved, in display order
pub fn seed_records() -> Vec<ToolRecord> {
    SEED.iter()
        .map(|entry| ToolRecord {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            url: entry.url.to_string(),
            description: entry.description.to_string(),
            category: entry.category,
            tags: entry.tags.iter().map(|t| t.to_string()).collect(),
            pricing_model: entry.pricing_model,
            image_url: Some(format!(
                "https://picsum.photos/seed/{}/400/300",
                entry.image_seed
            )),
            submitted_by_user_id: entry.submitted_by.to_string(),
            created_at: parse_timestamp(entry.created_at),
            status: ToolStatus::Approved,
        })
        .collect()
}
