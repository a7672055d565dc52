//! Interactive console menu over any line-based input.
//!
//! End of input behaves like choosing Quit.

use std::io::{self, BufRead, Write};

use parkhouse::{OccupiedSpot, ParkOutcome, ParkingRequest, ParkingService, SpotKind};

const MENU: &str = "\nCity Parking System
1. Park vehicle
2. Remove vehicle
3. View parking status
4. Check electric spots
5. View special vehicles
6. Quit";

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `text` without a newline and read one trimmed line.
    /// `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn list_vehicles(&mut self, rows: &[OccupiedSpot]) -> io::Result<()> {
        for row in rows {
            writeln!(
                self.output,
                "Area {}, Floor {}, Spot {}: {}",
                row.zone, row.floor, row.spot, row.plate
            )?;
        }
        Ok(())
    }
}

pub fn run<R: BufRead, W: Write>(service: &ParkingService, input: R, output: W) -> io::Result<()> {
    let mut console = Console { input, output };

    loop {
        console.say(MENU)?;
        let Some(action) = console.prompt("What would you like to do? ")? else {
            break;
        };

        match action.as_str() {
            "1" => {
                if !park(service, &mut console)? {
                    break;
                }
            }
            "2" => {
                let Some(plate) = console.prompt("Enter plate to remove: ")? else {
                    break;
                };
                match service.remove(&plate) {
                    Some(_) => console.say("Vehicle removed")?,
                    None => console.say("Vehicle not found")?,
                }
            }
            "3" => show_status(service, &mut console)?,
            "4" => {
                console.say("\nAvailable electric spots:")?;
                for spot in service.reserved(SpotKind::Car) {
                    console.say(&spot.location())?;
                }
            }
            "5" => {
                console.say("\nSpecial vehicles parked:")?;
                console.list_vehicles(&service.priority_occupied())?;
            }
            "6" => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            _ => console.say("Please choose 1-6")?,
        }
    }

    tracing::debug!("Console input closed");
    Ok(())
}

/// Returns `false` if input ran out mid-dialogue.
fn park<R: BufRead, W: Write>(
    service: &ParkingService,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    let Some(plate) = console.prompt("Vehicle plate number: ")? else {
        return Ok(false);
    };

    let Some(mut answer) = console.prompt("Vehicle type (bike/car/truck): ")? else {
        return Ok(false);
    };
    let kind = loop {
        match answer.parse::<SpotKind>() {
            Ok(kind) => break kind,
            Err(_) => {
                console.say("Please enter bike, car, or truck")?;
                let Some(next) = console.prompt("Vehicle type: ")? else {
                    return Ok(false);
                };
                answer = next;
            }
        }
    };

    let Some(special) = console.prompt("Special vehicle? (y/n): ")? else {
        return Ok(false);
    };

    let request = ParkingRequest {
        plate,
        kind,
        priority: special.eq_ignore_ascii_case("y"),
    };

    match service.park(request) {
        Ok(ParkOutcome::Parked(spot)) => console.say(&format!("Park at: {}", spot.location()))?,
        Ok(ParkOutcome::Unavailable) => console.say("No spots available for this vehicle")?,
        Err(e) => console.say(&e.to_string())?,
    }
    Ok(true)
}

fn show_status<R: BufRead, W: Write>(
    service: &ParkingService,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let status = service.status();

    console.say("\nParking Overview:")?;
    console.say(&format!("Total spots: {}", status.total))?;
    console.say(&format!("Occupied spots: {}", status.occupied))?;
    for (kind, count) in &status.available {
        console.say(&format!("Open {kind} spots: {count}"))?;
    }

    console.say("\nVehicles parked:")?;
    console.list_vehicles(&status.vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkhouse::{GarageLayout, ParkingManager};

    fn run_script(service: &ParkingService, script: &str) -> String {
        let mut output = Vec::new();
        run(service, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn city_garage() -> ParkingService {
        ParkingService::new(ParkingManager::new(&GarageLayout::default()).unwrap())
    }

    #[test]
    fn quit_says_goodbye() {
        let output = run_script(&city_garage(), "6\n");
        assert!(output.contains("City Parking System"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn end_of_input_stops_quietly() {
        let output = run_script(&city_garage(), "");
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn invalid_choice_is_reported() {
        let output = run_script(&city_garage(), "9\n6\n");
        assert!(output.contains("Please choose 1-6"));
    }

    #[test]
    fn park_then_remove() {
        let service = city_garage();
        let output = run_script(&service, "1\nAB-123\ncar\nn\n2\nAB-123\n2\nAB-123\n6\n");

        assert!(output.contains("Park at: Area North, Floor 1, Spot 1"));
        assert!(output.contains("Vehicle removed"));
        assert!(output.contains("Vehicle not found"));
        assert_eq!(service.status().occupied, 0);
    }

    #[test]
    fn vehicle_type_is_reprompted() {
        let service = city_garage();
        let output = run_script(&service, "1\nTR-1\nboat\nTruck\ny\n6\n");

        assert!(output.contains("Please enter bike, car, or truck"));
        assert!(output.contains("Vehicle type: "));
        assert!(output.contains("Park at: Area North, Floor 1, Spot 3"));
        assert!(service.locate("TR-1").is_some());
    }

    #[test]
    fn full_garage_reports_no_spot() {
        let script = "1\nB1\nbike\nn\n1\nB2\nbike\nn\n1\nB3\nbike\nn\n1\nB4\nbike\nn\n6\n";
        let output = run_script(&city_garage(), script);
        assert!(output.contains("No spots available for this vehicle"));
    }

    #[test]
    fn status_lists_counts_and_vehicles() {
        let output = run_script(&city_garage(), "1\nEV-1\ncar\ny\n3\n6\n");

        assert!(output.contains("Total spots: 13"));
        assert!(output.contains("Occupied spots: 1"));
        assert!(output.contains("Open bike spots: 3"));
        assert!(output.contains("Open car spots: 6"));
        assert!(output.contains("Open truck spots: 3"));
        assert!(output.contains("Area North, Floor 1, Spot 1: EV-1"));
    }

    #[test]
    fn electric_and_special_listings() {
        let output = run_script(&city_garage(), "1\nEV-1\ncar\ny\n4\n5\n6\n");

        let after_electric = output.split("Available electric spots:").nth(1).unwrap();
        let electric = after_electric.split("City Parking System").next().unwrap();
        assert!(electric.contains("Area North, Floor 1, Spot 5"));
        assert!(electric.contains("Area South, Floor 1, Spot 11"));
        assert!(!electric.contains("Spot 1\n"));

        let special = output.split("Special vehicles parked:").nth(1).unwrap();
        assert!(special.contains("Area North, Floor 1, Spot 1: EV-1"));
    }

    #[test]
    fn duplicate_plate_is_reported() {
        let output = run_script(&city_garage(), "1\nAB-1\ncar\nn\n1\nAB-1\ncar\nn\n6\n");
        assert!(output.contains("already parked at spot 1"));
    }

    #[test]
    fn input_ending_mid_park_stops() {
        let service = city_garage();
        let output = run_script(&service, "1\nAB-1\n");
        assert!(output.ends_with("Vehicle type (bike/car/truck): "));
        assert_eq!(service.status().occupied, 0);
    }
}
