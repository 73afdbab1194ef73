//! Text menu that drives a [`SharedScheduler`] from line-based input.
//!
//! Field parsing and validation live here; the core only ever sees
//! well-formed values. Bad input prints a message and asks again. End of
//! input ends the session quietly.

use crate::core::report::{render_assignments, render_snapshot, ReportFormat};
use crate::core::shared::SharedScheduler;
use crate::domain::model::{validate_severity, AssignmentRecord, DispatchStatus, QueueKind};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use std::fmt::Display;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const MENU: &str = "\n--- Hospital Management System ---\n\
1. Add Emergency Patient\n\
2. Add Regular Patient\n\
3. Assign Doctor\n\
4. Release Doctors\n\
5. Display Queues\n\
6. Exit\n\
7. Export Report\n";

struct PatientFields {
    id: i64,
    name: String,
    age: u32,
    contact: String,
}

pub struct Menu<R, W> {
    scheduler: SharedScheduler,
    lines: Lines<R>,
    out: W,
    history: Vec<AssignmentRecord>,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(scheduler: SharedScheduler, input: R, out: W) -> Self {
        Self {
            scheduler,
            lines: input.lines(),
            out,
            history: Vec::new(),
        }
    }

    /// Every assignment made during this session, oldest first.
    pub fn history(&self) -> &[AssignmentRecord] {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.write(MENU).await?;
            let Some(choice) = self.prompt("Enter your choice: ").await? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };

            let keep_going = match choice.trim() {
                "1" => self.add_emergency_patient().await?,
                "2" => self.add_regular_patient().await?,
                "3" => {
                    self.assign_doctors().await?;
                    true
                }
                "4" => self.release_doctors().await?,
                "5" => {
                    self.display_queues().await?;
                    true
                }
                "6" => {
                    self.write("Exiting the system...\n").await?;
                    false
                }
                "7" => self.export_report().await?,
                _ => {
                    self.write("Invalid choice. Please try again.\n").await?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.write(label).await?;
        Ok(self.lines.next_line().await?)
    }

    /// Asks until the answer parses and passes `check`. `None` means the
    /// input ended first.
    async fn read_field<T>(
        &mut self,
        label: &str,
        field: &str,
        check: impl Fn(&T) -> Result<()>,
    ) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let Some(line) = self.prompt(label).await? else {
                return Ok(None);
            };

            match line.trim().parse::<T>() {
                Ok(value) => match check(&value) {
                    Ok(()) => return Ok(Some(value)),
                    Err(e) => {
                        self.write(&format!("❌ {}\n", e.user_friendly_message()))
                            .await?
                    }
                },
                Err(e) => self.write(&format!("❌ Invalid {}: {}\n", field, e)).await?,
            }
        }
    }

    async fn read_patient_fields(&mut self) -> Result<Option<PatientFields>> {
        let Some(id) = self
            .read_field("Enter Patient ID: ", "id", |_: &i64| Ok(()))
            .await?
        else {
            return Ok(None);
        };
        let Some(name) = self
            .read_field("Enter Patient Name: ", "name", |v: &String| {
                validate_non_empty_string("name", v)
            })
            .await?
        else {
            return Ok(None);
        };
        let Some(age) = self
            .read_field("Enter Patient Age: ", "age", |_: &u32| Ok(()))
            .await?
        else {
            return Ok(None);
        };
        let Some(contact) = self
            .read_field("Enter Patient Contact: ", "contact", |v: &String| {
                validate_non_empty_string("contact", v)
            })
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(PatientFields {
            id,
            name,
            age,
            contact,
        }))
    }

    async fn add_emergency_patient(&mut self) -> Result<bool> {
        let Some(fields) = self.read_patient_fields().await? else {
            return Ok(false);
        };
        let Some(severity) = self
            .read_field("Enter Patient Severity (1-10): ", "severity", |v: &i64| {
                validate_severity(*v).map(|_| ())
            })
            .await?
        else {
            return Ok(false);
        };

        match self
            .scheduler
            .enqueue_emergency(fields.id, fields.name, fields.age, fields.contact, severity)
            .await
        {
            Ok(()) => self.write("Emergency patient added to queue.\n").await?,
            Err(e) => self.write(&format!("❌ {}\n", e.user_friendly_message())).await?,
        }
        Ok(true)
    }

    async fn add_regular_patient(&mut self) -> Result<bool> {
        let Some(fields) = self.read_patient_fields().await? else {
            return Ok(false);
        };

        self.scheduler
            .enqueue_regular(fields.id, fields.name, fields.age, fields.contact)
            .await;
        self.write("Regular patient added to queue.\n").await?;
        Ok(true)
    }

    async fn assign_doctors(&mut self) -> Result<()> {
        let outcome = self.scheduler.dispatch_all().await;

        if outcome.status == DispatchStatus::AllBusy {
            return self.write("No doctors are currently available.\n").await;
        }

        for record in &outcome.assignments {
            let line = match record.source {
                QueueKind::Emergency => format!(
                    "Assigned Doctor to Emergency Patient: {} (Severity: {})\n",
                    record.patient.name,
                    record.patient.severity.unwrap_or_default()
                ),
                QueueKind::Regular => {
                    format!("Assigned Doctor to Regular Patient: {}\n", record.patient.name)
                }
            };
            self.out.write_all(line.as_bytes()).await?;
        }

        if outcome.units_exhausted() {
            self.write("All doctors are currently busy.\n").await?;
        } else {
            self.write("No patients in the queue.\n").await?;
        }

        self.history.extend(outcome.assignments);
        Ok(())
    }

    async fn release_doctors(&mut self) -> Result<bool> {
        let Some(count) = self
            .read_field(
                "Enter number of doctors becoming available: ",
                "release count",
                |_: &i64| Ok(()),
            )
            .await?
        else {
            return Ok(false);
        };

        match self.scheduler.release(count).await {
            Ok(total) => {
                self.write(&format!(
                    "{} doctors are now available.\nDoctors on duty: {}\n",
                    count, total
                ))
                .await?
            }
            Err(e) => self.write(&format!("❌ {}\n", e.user_friendly_message())).await?,
        }
        Ok(true)
    }

    async fn display_queues(&mut self) -> Result<()> {
        let snapshot = self.scheduler.snapshot().await;
        let mut text = String::from("\n--- Emergency Queue ---\n");
        for patient in &snapshot.emergency {
            text.push_str(&format!(
                "Patient ID: {}, Name: {}, Severity: {}\n",
                patient.id,
                patient.name,
                patient.severity.unwrap_or_default()
            ));
        }

        text.push_str("\n--- Regular Queue ---\n");
        for patient in &snapshot.regular {
            text.push_str(&format!(
                "Patient ID: {}, Name: {}\n",
                patient.id, patient.name
            ));
        }

        self.write(&text).await
    }

    async fn export_report(&mut self) -> Result<bool> {
        let Some(format) = self
            .read_field::<ReportFormat>(
                "Report format (csv/tsv/json): ",
                "report format",
                |_| Ok(()),
            )
            .await?
        else {
            return Ok(false);
        };

        let snapshot = self.scheduler.snapshot().await;
        let queues = render_snapshot(&snapshot, format)?;
        let assignments = render_assignments(&self.history, format)?;

        self.write(&format!(
            "\n--- Queues ---\n{}\n--- Assignments ---\n{}\n",
            queues, assignments
        ))
        .await?;
        Ok(true)
    }
}
