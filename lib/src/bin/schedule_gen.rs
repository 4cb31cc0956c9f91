use powcheck::types::PowSchedule;
use powcheck::util::Saveable;
use std::env;
use std::process::exit;


fn usage() -> ! {

    eprintln!("Usage: schedule_gen <schedule_file> <current_rule_height>");

    exit(1);
}


fn main() {

    let path = env::args().nth(1).unwrap_or_else(|| usage());

    let height = match env::args().nth(2).map(|arg| arg.parse::<u64>()) {

        Some(Ok(height)) => height,

        Some(Err(e)) => {

            eprintln!("invalid height: {}", e);
            exit(1);
        }

        None => usage(),
    };

    let schedule = PowSchedule::new(height);

    schedule.save_to_file(&path).expect("failed to save schedule");

    println!("current rule from height {} written to {}", schedule.current_rule_height(), path);
}
