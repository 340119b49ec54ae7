pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod list_live;
pub mod list_my;
pub mod notify;
pub mod results;
pub mod scoring;
pub mod submit;
pub mod take;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    AssessmentListParams, CreateAssessmentRequest, SubmitAssessmentRequest,
    UpdateAssessmentRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_assessment(
        &self,
        request: &HttpRequest,
        created_by: i64,
        req: CreateAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, request, created_by, req).await
    }

    pub async fn list_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, request, query).await
    }

    pub async fn list_my_assessments(
        &self,
        request: &HttpRequest,
        query: AssessmentListParams,
    ) -> ActixResult<HttpResponse> {
        list_my::list_my_assessments(self, request, query).await
    }

    pub async fn list_live_assessments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list_live::list_live_assessments(self, request).await
    }

    pub async fn get_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assessment(self, request, assessment_id).await
    }

    pub async fn update_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        req: UpdateAssessmentRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::update_assessment(self, request, assessment_id, req, user_id).await
    }

    pub async fn delete_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, request, assessment_id, user_id).await
    }

    pub async fn take_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        take::take_assessment(self, request, assessment_id, student_id).await
    }

    pub async fn submit_assessment(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        student_id: i64,
        req: SubmitAssessmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assessment(self, request, assessment_id, student_id, req).await
    }

    pub async fn get_assessment_results(
        &self,
        request: &HttpRequest,
        assessment_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::get_assessment_results(self, request, assessment_id, user_id).await
    }
}
