//! 公告

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{
    EntityForm, FormPage, SelectField, TextAreaField, TextField, enum_label, enum_options,
};
use crate::components::list_view::{Column, ListFilter, ListView};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use chrono::Local;
use hrms_shared::date::{display_date, display_opt_date, parse_form_date, to_form_date};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{
    Announcement, AnnouncementPriority, AnnouncementRequest, ListQuery, SortDirection,
};
use leptos::prelude::*;

const PRIORITIES: [AnnouncementPriority; 3] = [
    AnnouncementPriority::Low,
    AnnouncementPriority::Normal,
    AnnouncementPriority::High,
];

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <AnnouncementList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=AnnouncementForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<Announcement> id=id area=Area::Announcements fields=fields />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=AnnouncementForm::new() id=Some(id) /> }.into_any(),
    }
}

fn priority_from_str(raw: &str) -> Option<AnnouncementPriority> {
    PRIORITIES.into_iter().find(|p| p.as_str() == raw)
}

fn priority_badge(priority: AnnouncementPriority) -> AnyView {
    let class = match priority {
        AnnouncementPriority::High => "badge badge-error badge-sm",
        AnnouncementPriority::Normal => "badge badge-info badge-sm",
        AnnouncementPriority::Low => "badge badge-ghost badge-sm",
    };
    let text = enum_label(priority.as_str());
    view! { <span class=class>{text}</span> }.into_any()
}

fn columns() -> Vec<Column<Announcement>> {
    vec![
        Column::sortable("Title", "title", |a: &Announcement| a.title.clone().into_any()),
        Column::sortable("Priority", "priority", |a: &Announcement| {
            priority_badge(a.priority)
        }),
        Column::sortable("Published", "publishDate", |a: &Announcement| {
            display_date(a.publish_date).into_any()
        }),
        Column::new("Expires", |a: &Announcement| display_opt_date(a.expiry_date).into_any()),
        Column::new("Status", |a: &Announcement| {
            if a.is_active_on(Local::now().date_naive()) {
                view! { <span class="badge badge-success badge-sm">"Active"</span> }.into_any()
            } else {
                view! { <span class="badge badge-ghost badge-sm">"Inactive"</span> }.into_any()
            }
        }),
        Column::new("Author", |a: &Announcement| {
            a.author_name.clone().unwrap_or_default().into_any()
        }),
    ]
}

fn filters() -> Vec<ListFilter> {
    vec![ListFilter {
        field: "priority",
        label: "priorities",
        options: enum_options(PRIORITIES.iter().map(AnnouncementPriority::as_str)),
    }]
}

fn fields(a: &Announcement) -> Vec<(&'static str, String)> {
    vec![
        ("Title", a.title.clone()),
        ("Priority", enum_label(a.priority.as_str())),
        ("Published", display_date(a.publish_date)),
        ("Expires", display_opt_date(a.expiry_date)),
        ("Author", a.author_name.clone().unwrap_or_default()),
        ("Content", a.content.clone()),
    ]
}

#[component]
fn AnnouncementList() -> impl IntoView {
    let auth = use_auth();
    let query =
        ListQuery::new(auth.config().page_size).with_sort("publishDate", SortDirection::Desc);
    let handle = use_list_controller(query, auth.services().announcements.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Announcements" />
            <ListView<Announcement>
                handle=handle
                columns=columns()
                area=Area::Announcements
                filters=filters()
            />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct AnnouncementForm {
    title: RwSignal<String>,
    content: RwSignal<String>,
    priority: RwSignal<String>,
    publish_date: RwSignal<String>,
    expiry_date: RwSignal<String>,
}

impl EntityForm for AnnouncementForm {
    type Entity = Announcement;

    const AREA: Area = Area::Announcements;

    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
            priority: RwSignal::new(AnnouncementPriority::default().as_str().to_string()),
            publish_date: RwSignal::new(String::new()),
            expiry_date: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, a: &Announcement) {
        self.title.set(a.title.clone());
        self.content.set(a.content.clone());
        self.priority.set(a.priority.as_str().to_string());
        self.publish_date.set(to_form_date(Some(a.publish_date)));
        self.expiry_date.set(to_form_date(a.expiry_date));
    }

    fn to_request(&self) -> Result<AnnouncementRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let publish_date = parse_form_date(&self.publish_date.get_untracked());
        if publish_date.is_none() {
            errors.add("publish_date", "Publish date is required");
        }
        let expiry_input = self.expiry_date.get_untracked();
        let expiry_date = parse_form_date(&expiry_input);
        if expiry_date.is_none() && !expiry_input.trim().is_empty() {
            errors.add("expiry_date", "Please enter a valid date");
        }
        let priority = priority_from_str(&self.priority.get_untracked());
        if priority.is_none() {
            errors.add("priority", "Please select a priority");
        }

        match (publish_date, priority) {
            (Some(publish_date), Some(priority)) if errors.is_empty() => Ok(AnnouncementRequest {
                title: self.title.get_untracked().trim().to_string(),
                content: self.content.get_untracked().trim().to_string(),
                priority,
                publish_date,
                expiry_date,
            }),
            _ => Err(errors),
        }
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        let priorities = Signal::stored(enum_options(
            PRIORITIES.iter().map(AnnouncementPriority::as_str),
        ));

        view! {
            <TextField label="Title" field="title" value=self.title errors=errors required=true />
            <div class="grid grid-cols-1 md:grid-cols-3 gap-x-4">
                <SelectField label="Priority" field="priority" value=self.priority errors=errors options=priorities />
                <TextField label="Publish date" field="publish_date" value=self.publish_date errors=errors input_type="date" required=true />
                <TextField label="Expiry date" field="expiry_date" value=self.expiry_date errors=errors input_type="date" />
            </div>
            <TextAreaField label="Content" field="content" value=self.content errors=errors />
        }
        .into_any()
    }
}
