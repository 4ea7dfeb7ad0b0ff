use crate::cli::parser::{Cli, Commands, StaffAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Role;
use crate::ui::messages::success;
use crate::utils::table::Table;

fn parse_role(raw: &str) -> AppResult<Role> {
    Role::parse(raw).ok_or_else(|| AppError::InvalidRole(raw.to_string()))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Staff { action } = &cli.command else {
        return Ok(());
    };

    let mut controller = super::open_controller(cfg)?;
    super::require_pin(&controller, cli.pin.as_deref())?;

    match action {
        StaffAction::Add { name, role } => {
            let role = parse_role(role)?;
            controller.add_employee(name, role)?;
            success(format!("Added {name} ({role})"));
        }
        StaffAction::Edit { id, name, role } => {
            let role = parse_role(role)?;
            controller.edit_employee(id, name, role)?;
            success(format!("Updated employee {id}"));
        }
        StaffAction::Remove { id } => {
            let name = controller.employee_name(id);
            controller.deactivate_employee(id)?;
            success(format!("Deactivated {name}; their history is kept"));
        }
        StaffAction::List { all } => {
            let mut table = Table::new(&["Id", "Name", "Role", "Active"]);
            for emp in controller.employees() {
                if !all && !emp.is_active {
                    continue;
                }
                table.add_row(vec![
                    emp.id.clone(),
                    emp.name.clone(),
                    emp.role.to_string(),
                    if emp.is_active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
