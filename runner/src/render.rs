//! Human-readable rendering of simulation reports.

use simulator::SimReport;

pub fn print_summary(report: &SimReport, detailed: bool) {
    println!("\n{} Results:", report.policy);
    println!("Total Time: {} time units", report.total_time);
    println!("CPU Utilization: {:.2}%", report.cpu_utilization);
    println!("Context Switches: {}\n", report.context_switch_count);

    if detailed {
        println!("Process Details:");
        for p in &report.processes {
            println!("Process {}:", p.pid);
            println!("  Arrival Time: {}", p.arrival_time);
            println!("  Service Time: {}", p.service_time);
            println!("  I/O Time: {}", p.io_time);
            println!("  Finish Time: {}", p.finish_time);
            println!("  Turnaround Time: {}", p.turnaround_time);
            println!("  Waiting Time: {}\n", p.waiting_time);
        }
    }
}
