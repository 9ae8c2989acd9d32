use inv_admin::{
    form::{Draft, Form},
    message::{Banner, MessageKind},
    view::{SelectOption, Table},
};

pub fn banner(banner: &mut Banner) {
    let Some(message) = banner.current() else {
        return;
    };
    match message.kind {
        MessageKind::Error => eprintln!("[{}] {}", message.kind.as_str(), message.text),
        MessageKind::Info | MessageKind::Success => {
            println!("[{}] {}", message.kind.as_str(), message.text)
        }
    }
}

pub fn table(title: &str, table: &Table) {
    println!("\n{title}\n{table}");
}

pub fn annotations<D: Draft>(form: &Form<D>) {
    for (field, message) in form.annotations().iter() {
        eprintln!("  {field}: {message}");
    }
}

pub fn options(title: &str, options: &[SelectOption]) {
    println!("\n{title}");
    for option in options {
        println!("{option}");
    }
}
