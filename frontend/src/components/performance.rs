//! 绩效评估

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{
    EntityForm, FormPage, SelectField, TextAreaField, TextField, optional_text,
};
use crate::components::list_view::{Column, ListView};
use crate::components::lookup::{employee_options, selected_id};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use hrms_shared::date::{display_date, parse_form_date, to_form_date};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{Id, ListQuery, PerformanceReview, PerformanceReviewRequest, SortDirection};
use leptos::prelude::*;

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <ReviewList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=ReviewForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<PerformanceReview> id=id area=Area::Performance fields=fields owner=owner />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=ReviewForm::new() id=Some(id) /> }.into_any(),
    }
}

fn owner(review: &PerformanceReview) -> Option<Id> {
    Some(review.employee_id)
}

/// 评分显示为星级，如 `★★★☆☆`
fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn columns() -> Vec<Column<PerformanceReview>> {
    vec![
        Column::new("Employee", |r: &PerformanceReview| {
            r.employee_name.clone().unwrap_or_default().into_any()
        }),
        Column::new("Reviewer", |r: &PerformanceReview| {
            r.reviewer_name.clone().unwrap_or_default().into_any()
        }),
        Column::new("Period", |r: &PerformanceReview| {
            r.period.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Date", "reviewDate", |r: &PerformanceReview| {
            display_date(r.review_date).into_any()
        }),
        Column::sortable("Rating", "rating", |r: &PerformanceReview| {
            let text = stars(r.rating);
            view! { <span class="text-warning" title=r.rating.to_string()>{text}</span> }.into_any()
        }),
    ]
}

fn fields(r: &PerformanceReview) -> Vec<(&'static str, String)> {
    vec![
        ("Employee", r.employee_name.clone().unwrap_or_default()),
        ("Reviewer", r.reviewer_name.clone().unwrap_or_default()),
        ("Review date", display_date(r.review_date)),
        ("Period", r.period.clone().unwrap_or_default()),
        ("Rating", format!("{} ({}/5)", stars(r.rating), r.rating)),
        ("Comments", r.comments.clone().unwrap_or_default()),
    ]
}

#[component]
fn ReviewList() -> impl IntoView {
    let auth = use_auth();
    let query =
        ListQuery::new(auth.config().page_size).with_sort("reviewDate", SortDirection::Desc);
    let handle = use_list_controller(query, auth.services().performance.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Performance reviews" />
            <ListView<PerformanceReview>
                handle=handle
                columns=columns()
                area=Area::Performance
                owner=owner
            />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct ReviewForm {
    employee: RwSignal<String>,
    reviewer: RwSignal<String>,
    review_date: RwSignal<String>,
    period: RwSignal<String>,
    rating: RwSignal<String>,
    comments: RwSignal<String>,
}

impl EntityForm for ReviewForm {
    type Entity = PerformanceReview;

    const AREA: Area = Area::Performance;

    fn new() -> Self {
        // 默认由当前用户评估
        let reviewer = use_auth()
            .session
            .with_untracked(|s| s.as_ref().map(|s| s.user.employee_id.to_string()))
            .unwrap_or_default();

        Self {
            employee: RwSignal::new(String::new()),
            reviewer: RwSignal::new(reviewer),
            review_date: RwSignal::new(String::new()),
            period: RwSignal::new(String::new()),
            rating: RwSignal::new("3".to_string()),
            comments: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, r: &PerformanceReview) {
        self.employee.set(r.employee_id.to_string());
        self.reviewer.set(r.reviewer_id.to_string());
        self.review_date.set(to_form_date(Some(r.review_date)));
        self.period.set(r.period.clone().unwrap_or_default());
        self.rating.set(r.rating.to_string());
        self.comments.set(r.comments.clone().unwrap_or_default());
    }

    fn to_request(&self) -> Result<PerformanceReviewRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let review_date = parse_form_date(&self.review_date.get_untracked());
        if review_date.is_none() {
            errors.add("review_date", "Review date is required");
        }
        let rating = self.rating.get_untracked().trim().parse::<u8>().ok();
        if rating.is_none() {
            errors.add("rating", "Rating must be between 1 and 5");
        }

        match (review_date, rating) {
            (Some(review_date), Some(rating)) => Ok(PerformanceReviewRequest {
                employee_id: selected_id(&self.employee.get_untracked()).unwrap_or_default(),
                reviewer_id: selected_id(&self.reviewer.get_untracked()).unwrap_or_default(),
                review_date,
                period: optional_text(&self.period.get_untracked()),
                rating,
                comments: optional_text(&self.comments.get_untracked()),
            }),
            _ => Err(errors),
        }
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        let employees = employee_options();
        let ratings = Signal::stored(
            (1..=5u8)
                .map(|r| (r.to_string(), format!("{} - {}", r, stars(r))))
                .collect::<Vec<_>>(),
        );

        view! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <SelectField label="Employee" field="employee_id" value=self.employee errors=errors options=employees empty_label="Select an employee" />
                <SelectField label="Reviewer" field="reviewer_id" value=self.reviewer errors=errors options=employees empty_label="Select a reviewer" />
                <TextField label="Review date" field="review_date" value=self.review_date errors=errors input_type="date" required=true />
                <TextField label="Period" field="period" value=self.period errors=errors placeholder="2024 Q1" />
            </div>
            <SelectField label="Rating" field="rating" value=self.rating errors=errors options=ratings />
            <TextAreaField label="Comments" field="comments" value=self.comments errors=errors />
        }
        .into_any()
    }

    fn owner(entity: &PerformanceReview) -> Option<Id> {
        Some(entity.employee_id)
    }
}
