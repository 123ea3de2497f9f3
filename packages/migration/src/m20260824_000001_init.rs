use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Username,
}

#[derive(Iden)]
enum Trials {
    Table,
    TrialId,
    Title,
    Description,
    PlaintiffId,
    DefendantId,
    CurrentPhase,
    CurrentTurnUsername,
    CreatedAt,
    MotionToJudgmentCalled,
}

#[derive(Iden)]
enum TranscriptEntries {
    Table,
    EntryId,
    TrialId,
    Timestamp,
    SpeakerUsername,
    SpeakerRole,
    Content,
    ActionType,
}

#[derive(Iden)]
enum Evidence {
    Table,
    EvidenceId,
    TrialId,
    SubmittedByUsername,
    Description,
    Used,
}

#[derive(Iden)]
enum Witnesses {
    Table,
    WitnessId,
    Name,
    TrialId,
    CalledByUsername,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Trials::Table)
                    .col(
                        ColumnDef::new(Trials::TrialId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trials::Title).string().not_null())
                    .col(ColumnDef::new(Trials::Description).string().not_null())
                    .col(ColumnDef::new(Trials::PlaintiffId).string().not_null())
                    .col(ColumnDef::new(Trials::DefendantId).string().not_null())
                    .col(
                        ColumnDef::new(Trials::CurrentPhase)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trials::CurrentTurnUsername).string().null())
                    .col(
                        ColumnDef::new(Trials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trials::MotionToJudgmentCalled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trials_plaintiff")
                            .from(Trials::Table, Trials::PlaintiffId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trials_defendant")
                            .from(Trials::Table, Trials::DefendantId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TranscriptEntries::Table)
                    .col(
                        ColumnDef::new(TranscriptEntries::EntryId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TranscriptEntries::TrialId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TranscriptEntries::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TranscriptEntries::SpeakerUsername)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TranscriptEntries::SpeakerRole)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TranscriptEntries::Content).text().not_null())
                    .col(
                        ColumnDef::new(TranscriptEntries::ActionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transcript_entries_trial")
                            .from(TranscriptEntries::Table, TranscriptEntries::TrialId)
                            .to(Trials::Table, Trials::TrialId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Replay queries read the transcript per trial in time order.
        manager
            .create_index(
                Index::create()
                    .name("idx_transcript_entries_trial_timestamp")
                    .table(TranscriptEntries::Table)
                    .col(TranscriptEntries::TrialId)
                    .col(TranscriptEntries::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Evidence::Table)
                    .col(
                        ColumnDef::new(Evidence::EvidenceId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evidence::TrialId).string().not_null())
                    .col(
                        ColumnDef::new(Evidence::SubmittedByUsername)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evidence::Description).string().not_null())
                    .col(
                        ColumnDef::new(Evidence::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evidence_trial")
                            .from(Evidence::Table, Evidence::TrialId)
                            .to(Trials::Table, Trials::TrialId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Witnesses::Table)
                    .col(
                        ColumnDef::new(Witnesses::WitnessId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Witnesses::Name).string().not_null())
                    .col(ColumnDef::new(Witnesses::TrialId).string().not_null())
                    .col(
                        ColumnDef::new(Witnesses::CalledByUsername)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_witnesses_trial")
                            .from(Witnesses::Table, Witnesses::TrialId)
                            .to(Trials::Table, Trials::TrialId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Witnesses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evidence::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TranscriptEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
