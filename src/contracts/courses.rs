// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Course objects, the database course catalogue, and registered games.

use tracing::warn;

use crate::blockchain::{FieldSpec, FieldType, MoveArg, ObjectId, RecordSchema, SuiAddress};
use crate::models::CourseDetails;

use super::{created_id, ContractError, EduverseContract};

const COURSES_MODULE: &str = "courses";

/// Move type of the object created by `courses::create_course`.
pub const COURSE_TYPE: &str = "::courses::Course";

/// Return layout of `courses::get_course_details`.
pub const COURSE_SCHEMA: RecordSchema = RecordSchema {
    name: "course",
    version: 1,
    fields: &[
        FieldSpec::new("name", FieldType::String),
        FieldSpec::new("description", FieldType::String),
        FieldSpec::new("category", FieldType::String),
        FieldSpec::new("creator", FieldType::Address),
        FieldSpec::new("xp", FieldType::U64),
        FieldSpec::new("difficulty", FieldType::U8),
        FieldSpec::new("image", FieldType::String),
    ],
};

/// Return layout of `eduversex_database::get_all_courses`.
pub const COURSE_IDS_SCHEMA: RecordSchema = RecordSchema {
    name: "course_ids",
    version: 1,
    fields: &[FieldSpec::new("ids", FieldType::AddressVec)],
};

/// Fields of a course to publish.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub category: String,
    pub creator: SuiAddress,
    pub xp: u64,
    pub difficulty: u8,
    pub image: String,
}

#[derive(Clone)]
pub struct Courses {
    contract: EduverseContract,
}

impl Courses {
    pub fn new(contract: EduverseContract) -> Self {
        Self { contract }
    }

    /// Publish a course object and return its id.
    ///
    /// `None` when the write failed or created no course object.
    pub async fn create_course(&self, course: &NewCourse) -> Result<Option<ObjectId>, ContractError> {
        let call = self
            .contract
            .call(COURSES_MODULE, "create_course")?
            .string(&course.name)
            .string(&course.description)
            .string(&course.category)
            .arg(MoveArg::Address(course.creator))
            .u64(course.xp)
            .u8(course.difficulty)
            .string(&course.image)
            .build()?;

        let outcome = self.contract.submit(&call).await;
        let id = created_id(&outcome, COURSE_TYPE);
        if outcome.is_committed() && id.is_none() {
            warn!(name = %course.name, "Course transaction committed without a course object");
        }
        Ok(id)
    }

    pub async fn add_review(
        &self,
        course: ObjectId,
        reviewer: SuiAddress,
        rating: u8,
        comment: &str,
    ) -> Result<bool, ContractError> {
        let call = self
            .contract
            .call(COURSES_MODULE, "add_review")?
            .object(course)
            .arg(MoveArg::Address(reviewer))
            .u8(rating)
            .string(comment)
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    /// Add a published course to the database catalogue.
    pub async fn add_course(
        &self,
        name: &str,
        description: &str,
        course: ObjectId,
    ) -> Result<bool, ContractError> {
        self.catalogue_write("add_course", name, description, course)
            .await
    }

    pub async fn update_course(
        &self,
        name: &str,
        description: &str,
        course: ObjectId,
    ) -> Result<bool, ContractError> {
        self.catalogue_write("update_course", name, description, course)
            .await
    }

    pub async fn remove_course(&self, course: ObjectId) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("remove_course")?
            .arg(MoveArg::Address(course))
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn enroll_in_course(
        &self,
        user: SuiAddress,
        course: ObjectId,
    ) -> Result<bool, ContractError> {
        self.progress_write("enroll_in_course", user, course).await
    }

    pub async fn complete_course(
        &self,
        user: SuiAddress,
        course: ObjectId,
    ) -> Result<bool, ContractError> {
        self.progress_write("complete_course", user, course).await
    }

    pub async fn add_game(
        &self,
        name: &str,
        description: &str,
        game: SuiAddress,
    ) -> Result<bool, ContractError> {
        self.catalogue_write("add_game", name, description, game)
            .await
    }

    pub async fn remove_game(&self, game: SuiAddress) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call("remove_game")?
            .arg(MoveArg::Address(game))
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    pub async fn get_course_details(&self, course: ObjectId) -> Result<CourseDetails, ContractError> {
        let call = self
            .contract
            .call(COURSES_MODULE, "get_course_details")?
            .object(course)
            .build()?;
        let record = self.contract.query(&call, &COURSE_SCHEMA).await?;

        Ok(CourseDetails {
            id: course.to_string(),
            name: record.string("name")?,
            description: record.string("description")?,
            category: record.string("category")?,
            creator: record.address("creator")?.to_string(),
            xp: record.u64("xp")?,
            difficulty: record.u8("difficulty")?,
            image: record.string("image")?,
        })
    }

    /// Ids of every course in the catalogue.
    pub async fn get_all_courses(&self) -> Result<Vec<ObjectId>, ContractError> {
        let call = self.contract.database_call("get_all_courses")?.build()?;
        let record = self.contract.query(&call, &COURSE_IDS_SCHEMA).await?;
        Ok(record.addresses("ids")?)
    }

    /// Details of every catalogued course.
    ///
    /// Courses that no longer exist are skipped and logged; any other
    /// failure aborts the listing.
    pub async fn get_all_course_details(&self) -> Result<Vec<CourseDetails>, ContractError> {
        let ids = self.get_all_courses().await?;
        let mut courses = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_course_details(id).await {
                Ok(details) => courses.push(details),
                Err(e) if e.is_missing_object() => {
                    warn!(course = %id, error = %e, "Skipping missing course")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(courses)
    }

    /// `function(db, name, description, address)`.
    async fn catalogue_write(
        &self,
        function: &str,
        name: &str,
        description: &str,
        address: SuiAddress,
    ) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call(function)?
            .string(name)
            .string(description)
            .arg(MoveArg::Address(address))
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }

    /// `function(db, user, course)`.
    async fn progress_write(
        &self,
        function: &str,
        user: SuiAddress,
        course: ObjectId,
    ) -> Result<bool, ContractError> {
        let call = self
            .contract
            .database_call(function)?
            .arg(MoveArg::Address(user))
            .arg(MoveArg::Address(course))
            .build()?;
        Ok(self.contract.submit(&call).await.is_committed())
    }
}
