mod account;
mod add;
mod delete;
mod export;
mod list;
mod show;
mod types;
mod update;

pub use account::{
    cmd_login, cmd_logout, cmd_register, cmd_reset_password, cmd_whoami, read_password,
};
pub use add::cmd_add_pokemon;
pub use delete::cmd_delete_pokemon;
pub use export::cmd_export;
pub use list::cmd_list_pokemon;
pub use show::cmd_show_pokemon;
pub use types::cmd_types;
pub use update::cmd_update_pokemon;
