//! Purchase route handlers: quote forms, premium calculation, and the step
//! into checkout.
//!
//! Opening a form needs a login session. A successful calculation replaces
//! the visitor's purchase draft, whatever product it was for.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use insura_core::quote::{CarQuoteInput, HealthQuoteInput, LifeQuoteInput, PhotoSlot};
use insura_core::{Product, ProductType};

use super::products::{ProductView, find_product};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{AuthRejection, OptionalAuth, RequireAuth};
use crate::models::CurrentUser;
use crate::services::checkout::{CheckoutError, CheckoutService, load_draft, save_draft};
use crate::services::quote::{
    CalculateError, QuoteInput, calculate, parse_amount, parse_flag, parse_year,
};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Car quote form text fields. Photos arrive as separate multipart parts.
#[derive(Debug, Clone, Default)]
pub struct CarForm {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub plate: String,
    pub engine_number: String,
    pub chassis_number: String,
    pub owner_name: String,
    pub photos: Vec<PhotoSlot>,
}

impl CarForm {
    fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "brand" => &mut self.brand,
            "model" => &mut self.model,
            "year" => &mut self.year,
            "price" => &mut self.price,
            "plate" => &mut self.plate,
            "engine_number" => &mut self.engine_number,
            "chassis_number" => &mut self.chassis_number,
            "owner_name" => &mut self.owner_name,
            _ => return,
        };
        *slot = value;
    }

    fn to_input(&self) -> CarQuoteInput {
        CarQuoteInput {
            brand: self.brand.clone(),
            model: self.model.clone(),
            manufacture_year: parse_year(&self.year),
            declared_price: parse_amount(&self.price),
            plate: self.plate.clone(),
            engine_number: self.engine_number.clone(),
            chassis_number: self.chassis_number.clone(),
            owner_name: self.owner_name.clone(),
            photos: self.photos.iter().copied().collect(),
        }
    }

    /// Read the multipart car form.
    ///
    /// A photo counts as uploaded when its part has a file name and a
    /// non-empty body; the bytes are discarded.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(slot) = PhotoSlot::from_field_name(&name) {
                let has_file_name = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                if has_file_name && !bytes.is_empty() && !form.photos.contains(&slot) {
                    form.photos.push(slot);
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.set_text(&name, value);
            }
        }

        Ok(form)
    }
}

/// Health quote form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthForm {
    pub name: String,
    pub dob: String,
    pub occupation: String,
    pub smoker: String,
    pub hypertension: String,
    pub diabetes: String,
}

impl HealthForm {
    fn to_input(&self) -> HealthQuoteInput {
        HealthQuoteInput {
            name: self.name.clone(),
            date_of_birth: self.dob.clone(),
            occupation: self.occupation.clone(),
            smoker: parse_flag(&self.smoker),
            hypertension: parse_flag(&self.hypertension),
            diabetes: parse_flag(&self.diabetes),
        }
    }
}

/// Life quote form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LifeForm {
    pub name: String,
    pub dob: String,
    pub coverage: String,
}

impl LifeForm {
    fn to_input(&self) -> LifeQuoteInput {
        LifeQuoteInput {
            name: self.name.clone(),
            date_of_birth: self.dob.clone(),
            coverage: parse_amount(&self.coverage),
        }
    }
}

/// Submitted values for whichever form the product uses.
#[derive(Debug, Clone)]
pub enum PurchaseForm {
    Car(CarForm),
    Health(HealthForm),
    Life(LifeForm),
}

impl PurchaseForm {
    /// An empty form for the product's line.
    #[must_use]
    pub fn empty_for(product_type: ProductType) -> Self {
        match product_type {
            ProductType::Car => Self::Car(CarForm::default()),
            ProductType::Health => Self::Health(HealthForm::default()),
            ProductType::Life => Self::Life(LifeForm::default()),
        }
    }

    fn to_input(&self) -> QuoteInput {
        match self {
            Self::Car(form) => QuoteInput::Car(form.to_input()),
            Self::Health(form) => QuoteInput::Health(form.to_input()),
            Self::Life(form) => QuoteInput::Life(form.to_input()),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Car purchase page template.
#[derive(Template, WebTemplate)]
#[template(path = "purchase/car.html")]
pub struct CarPurchaseTemplate {
    pub current_user: Option<CurrentUser>,
    pub product: ProductView,
    pub form: CarForm,
    pub photo_slots: [PhotoSlot; 6],
    pub result: Option<String>,
    pub error: Option<String>,
}

/// Health purchase page template.
#[derive(Template, WebTemplate)]
#[template(path = "purchase/health.html")]
pub struct HealthPurchaseTemplate {
    pub current_user: Option<CurrentUser>,
    pub product: ProductView,
    pub form: HealthForm,
    pub result: Option<String>,
    pub error: Option<String>,
}

/// Life purchase page template.
#[derive(Template, WebTemplate)]
#[template(path = "purchase/life.html")]
pub struct LifePurchaseTemplate {
    pub current_user: Option<CurrentUser>,
    pub product: ProductView,
    pub form: LifeForm,
    pub result: Option<String>,
    pub error: Option<String>,
}

/// Everything needed to render a purchase page.
struct PurchasePage {
    current_user: Option<CurrentUser>,
    product: ProductView,
    form: PurchaseForm,
    result: Option<String>,
    error: Option<String>,
}

impl PurchasePage {
    fn new(current_user: Option<CurrentUser>, product: &Product, form: PurchaseForm) -> Self {
        Self {
            current_user,
            product: ProductView::from(product),
            form,
            result: None,
            error: None,
        }
    }

    fn render(self, status: StatusCode) -> Response {
        let Self {
            current_user,
            product,
            form,
            result,
            error,
        } = self;

        let page = match form {
            PurchaseForm::Car(form) => CarPurchaseTemplate {
                current_user,
                product,
                form,
                photo_slots: PhotoSlot::ALL,
                result,
                error,
            }
            .into_response(),
            PurchaseForm::Health(form) => HealthPurchaseTemplate {
                current_user,
                product,
                form,
                result,
                error,
            }
            .into_response(),
            PurchaseForm::Life(form) => LifePurchaseTemplate {
                current_user,
                product,
                form,
                result,
                error,
            }
            .into_response(),
        };

        (status, page).into_response()
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the quote form for a product.
///
/// Always starts with an empty form and no result, and leaves any existing
/// draft alone.
#[instrument(skip(current_user))]
pub async fn show(
    RequireAuth(current_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response> {
    let product = find_product(&id)?;
    let form = PurchaseForm::empty_for(product.product_type);

    Ok(PurchasePage::new(Some(current_user), product, form).render(StatusCode::OK))
}

/// Calculate a premium and store the result as the purchase draft.
///
/// The car form is multipart (it carries photos); the others are
/// url-encoded.
#[instrument(skip(state, current_user, session, request))]
pub async fn quote(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<String>,
    session: Session,
    request: Request,
) -> Result<Response> {
    let product = find_product(&id)?;

    let form = match product.product_type {
        ProductType::Car => {
            let multipart = Multipart::from_request(request, &state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            PurchaseForm::Car(CarForm::from_multipart(multipart).await?)
        }
        ProductType::Health => {
            let Form(form) = Form::<HealthForm>::from_request(request, &state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            PurchaseForm::Health(form)
        }
        ProductType::Life => {
            let Form(form) = Form::<LifeForm>::from_request(request, &state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            PurchaseForm::Life(form)
        }
    };

    let mut page = PurchasePage::new(current_user, product, form);

    match calculate(product, &page.form.to_input(), Utc::now()) {
        Ok(draft) => {
            save_draft(&session, &draft).await?;
            add_breadcrumb("purchase", "Premium calculated", &[("product_id", &id)]);
            page.result = Some(draft.quote.result_message());
            Ok(page.render(StatusCode::OK))
        }
        Err(CalculateError::Invalid(e)) => {
            tracing::info!(error = %e, "Quote rejected");
            page.error = Some(e.to_string());
            Ok(page.render(StatusCode::UNPROCESSABLE_ENTITY))
        }
        Err(e @ CalculateError::Purchase(_)) => Err(AppError::Internal(e.to_string())),
    }
}

/// Proceed from the quote form to checkout.
#[instrument(skip(state, current_user, session))]
pub async fn proceed(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<String>,
    session: Session,
) -> Result<Response> {
    let product = find_product(&id)?;
    let checkout = CheckoutService::new(state.storage());

    match checkout.check_out(load_draft(&session).await) {
        Ok((draft, _summary)) => {
            save_draft(&session, &draft).await?;
            Ok(Redirect::to("/checkout").into_response())
        }
        Err(CheckoutError::NotLoggedIn) => Ok(AuthRejection::LoginToCheckout.into_response()),
        Err(e @ CheckoutError::NoDraft) => {
            let mut page = PurchasePage::new(
                current_user,
                product,
                PurchaseForm::empty_for(product.product_type),
            );
            page.error = Some(e.to_string());
            Ok(page.render(StatusCode::BAD_REQUEST))
        }
        Err(e) => Err(e.into()),
    }
}
