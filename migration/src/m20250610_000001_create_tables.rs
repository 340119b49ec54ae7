use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建测评表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::JobId).big_integer().null())
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Description).text().not_null())
                    .col(
                        ColumnDef::new(Assessments::Duration)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::PassingScore).double().null())
                    .col(ColumnDef::new(Assessments::StartDate).big_integer().null())
                    .col(ColumnDef::new(Assessments::EndDate).big_integer().null())
                    .col(ColumnDef::new(Assessments::Difficulty).string().null())
                    .col(ColumnDef::new(Assessments::Category).string().null())
                    .col(ColumnDef::new(Assessments::Instructions).text().null())
                    .col(ColumnDef::new(Assessments::Questions).text().not_null())
                    .col(ColumnDef::new(Assessments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答台账表
        manager
            .create_table(
                Table::create()
                    .table(AssessmentResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::Answers)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::Score)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::TotalPoints)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::Passed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::TimeTaken)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::AutoSubmitted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentResults::Table, AssessmentResults::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssessmentResults::Table, AssessmentResults::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建岗位申请表
        manager
            .create_table(
                Table::create()
                    .table(JobApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobApplications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::JobId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JobApplications::Status).string().not_null())
                    .col(
                        ColumnDef::new(JobApplications::AppliedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JobApplications::Notes).text().null())
                    .col(
                        ColumnDef::new(JobApplications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobApplications::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(JobApplications::Table, JobApplications::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 用户表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .to_owned(),
            )
            .await?;

        // 测评表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_created_by")
                    .table(Assessments::Table)
                    .col(Assessments::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_status")
                    .table(Assessments::Table)
                    .col(Assessments::Status)
                    .to_owned(),
            )
            .await?;

        // 作答台账唯一索引：每个学生对每个测评至多一条记录，
        // 并发提交的最终仲裁
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_results_assessment_student")
                    .table(AssessmentResults::Table)
                    .col(AssessmentResults::AssessmentId)
                    .col(AssessmentResults::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessment_results_student_id")
                    .table(AssessmentResults::Table)
                    .col(AssessmentResults::StudentId)
                    .to_owned(),
            )
            .await?;

        // 岗位申请唯一索引：每个学生对每个岗位至多一条申请
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_job_applications_job_student")
                    .table(JobApplications::Table)
                    .col(JobApplications::JobId)
                    .col(JobApplications::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(JobApplications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssessmentResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    FullName,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    CreatedBy,
    JobId,
    Title,
    Description,
    Duration,
    PassingScore,
    StartDate,
    EndDate,
    Difficulty,
    Category,
    Instructions,
    Questions,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssessmentResults {
    #[sea_orm(iden = "assessment_results")]
    Table,
    Id,
    AssessmentId,
    StudentId,
    Answers,
    Score,
    TotalPoints,
    Percentage,
    Passed,
    StartedAt,
    SubmittedAt,
    TimeTaken,
    AutoSubmitted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JobApplications {
    #[sea_orm(iden = "job_applications")]
    Table,
    Id,
    JobId,
    StudentId,
    Status,
    AppliedAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}
