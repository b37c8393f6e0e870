//! HTTP API module for the FieldTrack engine.
//!
//! A thin trusted-caller surface over the core operations. Authentication,
//! sessions, and authorization live in an excluded outer layer: every
//! request here carries a trusted `employee_id` and the organizational
//! scope is resolved from the stored records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockInRequest, ClockOutRequest, CompanyQuery, CreateEmployeeRequest, CreateSiteRequest,
    DayQuery, PayrollQuery, RangeQuery, ReportQuery, SwitchSiteRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, ClockInResponse, HoursResponse, OkResponse, ShiftsResponse,
    StatusResponse,
};
pub use state::AppState;
